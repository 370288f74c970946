//! [`Surface`] adapter for `embedded-graphics` draw targets.
//!
//! Wraps any `DrawTarget<Color = Rgb565>` and translates the cluster's y-up
//! host coordinates into the target's y-down pixel grid. Arcs, rings, discs
//! and needles use the real `embedded-graphics` primitives instead of the
//! rectangle tiling fallbacks.
//!
//! Fonts: [`Font::Normal`] is the 6x10 ASCII mono font, [`Font::Big`] is
//! ProFont 18pt. Text is centered horizontally on its alphabetic baseline.
//! Fully transparent colors draw nothing.

use core::f32::consts::TAU;

use embedded_graphics::geometry::Angle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
#[allow(unused_imports)]
use micromath::F32Ext;
use profont::PROFONT_18_POINT;

use crate::colors::Color;
use crate::surface::{ArcStroke, Font, Rect, Surface, Vec2};

/// Centered on the baseline, matching [`Surface::draw_text`].
const TEXT_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Alphabetic)
    .build();

fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Normal => &FONT_6X10,
        Font::Big => &PROFONT_18_POINT,
    }
}

/// Stroke width in whole pixels, never zero.
#[inline]
fn pixel_width(width: f32) -> u32 { (width.round() as u32).max(1) }

/// Drawing surface over an `embedded-graphics` target.
pub struct GraphicsSurface<'a, D> {
    target: &'a mut D,
    height: i32,
}

impl<'a, D> GraphicsSurface<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        let bounds = target.bounding_box();
        let height = bounds.top_left.y + bounds.size.height as i32;
        Self { target, height }
    }

    /// Target height the y axis is flipped against.
    #[inline]
    pub const fn height(&self) -> i32 { self.height }

    /// Target pixel for a host point.
    pub fn point(
        &self,
        p: Vec2,
    ) -> Point {
        Point::new(p.x.round() as i32, (self.height as f32 - 1.0 - p.y).round() as i32)
    }

    /// Target rectangle covering the same pixel rows as `rect`.
    pub fn rectangle(
        &self,
        rect: Rect,
    ) -> Rectangle {
        let top = self.height - rect.bottom - rect.height as i32;
        Rectangle::new(Point::new(rect.left, top), Size::new(rect.width, rect.height))
    }
}

impl<D> Surface for GraphicsSurface<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    ) {
        if color.is_transparent() {
            return;
        }
        self.rectangle(rect)
            .into_styled(PrimitiveStyle::with_fill(color.to_rgb565()))
            .draw(&mut *self.target)
            .ok();
    }

    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) {
        if color.is_transparent() {
            return;
        }
        let style = MonoTextStyle::new(mono_font(font), color.to_rgb565());
        let at = self.point(Vec2::new(x, y));
        Text::with_text_style(text, at, style, TEXT_STYLE).draw(&mut *self.target).ok();
    }

    fn stroke_arc(
        &mut self,
        arc: ArcStroke,
        color: Color,
    ) {
        if color.is_transparent() {
            return;
        }
        let style = PrimitiveStyle::with_stroke(color.to_rgb565(), pixel_width(arc.width));
        let center = self.point(arc.center);
        let diameter = (arc.radius * 2.0).round() as u32;

        if arc.sweep().abs() >= TAU {
            Circle::with_center(center, diameter).into_styled(style).draw(&mut *self.target).ok();
            return;
        }
        // Flipping y mirrors angles
        Arc::with_center(
            center,
            diameter,
            Angle::from_radians(-arc.start),
            Angle::from_radians(-arc.sweep()),
        )
        .into_styled(style)
        .draw(&mut *self.target)
        .ok();
    }

    fn fill_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
    ) {
        if color.is_transparent() {
            return;
        }
        let diameter = (radius * 2.0).round() as u32;
        Circle::with_center(self.point(center), diameter)
            .into_styled(PrimitiveStyle::with_fill(color.to_rgb565()))
            .draw(&mut *self.target)
            .ok();
    }

    fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) {
        if color.is_transparent() {
            return;
        }
        Line::new(self.point(from), self.point(to))
            .into_styled(PrimitiveStyle::with_stroke(color.to_rgb565(), pixel_width(width)))
            .draw(&mut *self.target)
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::widgets::{Gauge, GaugeKind};

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    fn lit_pixels(display: &MockDisplay<Rgb565>) -> usize {
        (0..64)
            .flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p).is_some())
            .count()
    }

    #[test]
    fn test_rect_flipped_to_bottom_rows() {
        let mut display = display();
        let mut surface = GraphicsSurface::new(&mut display);
        assert_eq!(surface.height(), 64);
        surface.fill_rect(Rect::new(0, 0, 2, 3), WHITE);

        let white = Some(Rgb565::WHITE);
        assert_eq!(display.get_pixel(Point::new(0, 63)), white);
        assert_eq!(display.get_pixel(Point::new(1, 61)), white);
        assert_eq!(display.get_pixel(Point::new(0, 60)), None, "rect must be 3 rows tall");
        assert_eq!(display.get_pixel(Point::new(2, 63)), None, "rect must be 2 columns wide");
    }

    #[test]
    fn test_point_flip() {
        let mut display = display();
        let surface = GraphicsSurface::new(&mut display);
        assert_eq!(surface.point(Vec2::new(5.0, 0.0)), Point::new(5, 63));
        assert_eq!(surface.point(Vec2::new(5.0, 63.0)), Point::new(5, 0));
    }

    #[test]
    fn test_transparent_draws_nothing() {
        let mut display = display();
        let mut surface = GraphicsSurface::new(&mut display);
        let clear = Color { a: 0.0, ..RED };
        surface.fill_rect(Rect::new(0, 0, 10, 10), clear);
        surface.draw_text(Font::Normal, "X", 10.0, 10.0, clear);
        assert_eq!(lit_pixels(&display), 0);
    }

    #[test]
    fn test_upper_half_arc_lands_in_upper_half() {
        let mut display = display();
        let mut surface = GraphicsSurface::new(&mut display);
        surface.stroke_arc(
            ArcStroke {
                center: Vec2::new(32.0, 32.0),
                radius: 20.0,
                start: 0.3,
                end: 2.8,
                width: 1.0,
            },
            RED,
        );
        let below = (40..64)
            .flat_map(|y| (0..64).map(move |x| Point::new(x, y)))
            .filter(|p| display.get_pixel(*p).is_some())
            .count();
        assert!(lit_pixels(&display) > 0);
        assert_eq!(below, 0, "y-up upper arc must not reach the bottom of the target");
    }

    #[test]
    fn test_gauge_renders_through_adapter() {
        let mut display = display();
        let mut gauge = Gauge::new(GaugeKind::Tachometer, Vec2::new(32.0, 32.0), 28.0);
        gauge.update(5000.0);
        gauge.render(Some(&mut GraphicsSurface::new(&mut display)));
        assert!(lit_pixels(&display) > 500);
    }
}
