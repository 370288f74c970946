//! Host rendering surface.
//!
//! The host supplies two primitives and nothing else: fill an axis-aligned
//! rectangle, and draw one line of text. Everything the cluster draws is built
//! from those two calls.
//!
//! Hosts that do have real curve primitives can override the stroke and fill
//! hooks ([`Surface::stroke_arc`], [`Surface::fill_disc`],
//! [`Surface::stroke_segment`]). The default implementations tile rectangles
//! (see [`crate::widgets`]), so a two-primitive host gets the same shapes.
//!
//! # Coordinates
//!
//! Host pixels with the origin at the bottom-left and y pointing up. Angles are
//! radians, counter-clockwise from the positive x axis. Nothing is clipped;
//! keeping drawing inside the frame is the caller's job.

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::Color;
use crate::widgets::{tile_arc, tile_disc, tile_segment};

// =============================================================================
// Geometry
// =============================================================================

/// Point or offset in host pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` in direction `angle`.
    #[inline]
    pub fn polar(
        self,
        radius: f32,
        angle: f32,
    ) -> Self {
        Self::new(self.x + radius * angle.cos(), self.y + radius * angle.sin())
    }

    /// Linear interpolation, `t = 0` at `self`, `t = 1` at `other`.
    #[inline]
    pub fn lerp(
        self,
        other: Self,
        t: f32,
    ) -> Self {
        Self::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }

    #[inline]
    pub fn distance(
        self,
        other: Self,
    ) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Integer pixel rectangle, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub bottom: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(
        left: i32,
        bottom: i32,
        width: u32,
        height: u32,
    ) -> Self {
        Self { left, bottom, width, height }
    }

    /// Square of side `side` centered on `center`, snapped to the pixel grid.
    /// Never smaller than one pixel.
    pub fn centered_square(
        center: Vec2,
        side: f32,
    ) -> Self {
        let side = side.max(1.0);
        let half = side / 2.0;
        let extent = side.ceil() as u32;
        Self::new((center.x - half).floor() as i32, (center.y - half).floor() as i32, extent, extent)
    }
}

/// Font selector passed through to the host text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// Scale labels, units, gauge names.
    #[default]
    Normal,
    /// Numeric readout in the middle of a dial.
    Big,
}

/// Ring arc stroke from `start` to `end` (either direction).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center: Vec2,
    pub radius: f32,
    pub start: f32,
    pub end: f32,
    pub width: f32,
}

impl ArcStroke {
    /// Signed angular span.
    #[inline]
    pub fn sweep(&self) -> f32 { self.end - self.start }
}

// =============================================================================
// Surface Trait
// =============================================================================

/// A host rendering context.
///
/// Only [`fill_rect`](Surface::fill_rect) and [`draw_text`](Surface::draw_text)
/// are required. Text is positioned by the horizontal center of its baseline.
pub trait Surface {
    /// Fill `rect` with `color`.
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    );

    /// Draw `text` centered horizontally on `x`, baseline at `y`.
    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    );

    /// Stroke a ring arc. Defaults to overlapping square tiles.
    fn stroke_arc(
        &mut self,
        arc: ArcStroke,
        color: Color,
    ) {
        tile_arc(self, arc, color);
    }

    /// Fill a disc. Defaults to one rectangle per pixel row.
    fn fill_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
    ) {
        tile_disc(self, center, radius, color);
    }

    /// Stroke a thick straight segment. Defaults to overlapping square tiles.
    fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) {
        tile_segment(self, from, to, width, color);
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    ) {
        (**self).fill_rect(rect, color);
    }

    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) {
        (**self).draw_text(font, text, x, y, color);
    }

    fn stroke_arc(
        &mut self,
        arc: ArcStroke,
        color: Color,
    ) {
        (**self).stroke_arc(arc, color);
    }

    fn fill_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
    ) {
        (**self).fill_disc(center, radius, color);
    }

    fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) {
        (**self).stroke_segment(from, to, width, color);
    }
}
