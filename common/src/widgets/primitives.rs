//! Low-level drawing primitives shared across widgets.
//!
//! The `draw_*` functions are what widgets call. They forward to the surface
//! hooks so hosts with real curve primitives can take over. The `tile_*`
//! functions are the fallbacks behind those hooks, built only from
//! [`Surface::fill_rect`].
//!
//! Tiles along a curve are spaced at most one stroke width apart, so strokes
//! stay unbroken at every radius. Discs are filled one pixel row at a time, so
//! there is no banding.

use core::f32::consts::TAU;

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::Color;
use crate::config::{ARC_STROKE_FRACTION, MIN_STROKE};
use crate::surface::{ArcStroke, Rect, Surface, Vec2};

/// Stroke width used for arcs and rings of the given radius.
#[inline]
pub fn stroke_width(radius: f32) -> f32 { (radius * ARC_STROKE_FRACTION).max(MIN_STROKE) }

/// Draw a ring arc spanning exactly `[angle_start, angle_end]`.
///
/// A zero span or non-positive radius draws nothing.
#[allow(clippy::float_cmp)]
pub fn draw_arc<S>(
    surface: &mut S,
    center: Vec2,
    radius: f32,
    angle_start: f32,
    angle_end: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    if radius <= 0.0 || angle_start == angle_end {
        return;
    }
    surface.stroke_arc(
        ArcStroke {
            center,
            radius,
            start: angle_start,
            end: angle_end,
            width: stroke_width(radius),
        },
        color,
    );
}

/// Draw a full ring.
pub fn draw_circle<S>(
    surface: &mut S,
    center: Vec2,
    radius: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    draw_arc(surface, center, radius, 0.0, TAU, color);
}

/// Draw a filled disc.
pub fn draw_filled_circle<S>(
    surface: &mut S,
    center: Vec2,
    radius: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    if radius <= 0.0 {
        return;
    }
    surface.fill_disc(center, radius, color);
}

/// Draw a gauge needle from `from` to `to`.
pub fn draw_needle<S>(
    surface: &mut S,
    from: Vec2,
    to: Vec2,
    width: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    surface.stroke_segment(from, to, width.max(MIN_STROKE), color);
}

// =============================================================================
// Rectangle Tiling Fallbacks
// =============================================================================

/// Tile an arc with squares of side `arc.width` centered on the arc.
/// Both endpoints are always covered.
pub fn tile_arc<S>(
    surface: &mut S,
    arc: ArcStroke,
    color: Color,
) where
    S: Surface + ?Sized,
{
    let sweep = arc.sweep();
    let length = sweep.abs() * arc.radius;
    let steps = tile_steps(length, arc.width);
    for i in 0..=steps {
        let angle = arc.start + sweep * (i as f32 / steps as f32);
        surface.fill_rect(Rect::centered_square(arc.center.polar(arc.radius, angle), arc.width), color);
    }
}

/// Tile a straight segment with squares of side `width`.
pub fn tile_segment<S>(
    surface: &mut S,
    from: Vec2,
    to: Vec2,
    width: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    let steps = tile_steps(from.distance(to), width);
    for i in 0..=steps {
        let at = from.lerp(to, i as f32 / steps as f32);
        surface.fill_rect(Rect::centered_square(at, width), color);
    }
}

/// Fill a disc with one rectangle per pixel row.
pub fn tile_disc<S>(
    surface: &mut S,
    center: Vec2,
    radius: f32,
    color: Color,
) where
    S: Surface + ?Sized,
{
    let rows = radius.ceil() as i32;
    let radius_sq = radius * radius;
    for row in -rows..=rows {
        let dy = row as f32;
        let half_sq = radius_sq - dy * dy;
        if half_sq < 0.0 {
            continue;
        }
        let half = half_sq.sqrt();
        let left = (center.x - half).floor() as i32;
        let right = (center.x + half).ceil() as i32;
        let bottom = (center.y + dy).floor() as i32;
        surface.fill_rect(Rect::new(left, bottom, (right - left).max(1) as u32, 1), color);
    }
}

/// Number of tile intervals needed to keep tiles at most `spacing` apart.
#[inline]
fn tile_steps(
    length: f32,
    spacing: f32,
) -> u32 {
    let spacing = spacing.max(MIN_STROKE);
    ((length / spacing).ceil() as u32).max(1)
}
