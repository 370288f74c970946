//! Color type and palette for the instrument cluster.
//!
//! Hosts hand colors around as RGBA floats in `[0, 1]`, so that is the
//! canonical representation here. [`Color::to_rgb565`] converts for
//! `embedded-graphics` targets (see [`crate::display`]).
//!
//! ## Rgb565 Conversion
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! Each float channel is clamped to `[0, 1]` and rounded to the nearest step.
//! Alpha has no Rgb565 counterpart and is dropped.

use embedded_graphics::pixelcolor::Rgb565;

/// RGBA color with float channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from three channels.
    pub const fn rgb(
        r: f32,
        g: f32,
        b: f32,
    ) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque gray with all channels set to `level`.
    pub const fn gray(level: f32) -> Self { Self::rgb(level, level, level) }

    /// True when the color would not cover anything.
    #[inline]
    pub fn is_transparent(self) -> bool { self.a <= 0.0 }

    /// Convert to the 16-bit format used by `embedded-graphics` displays.
    pub fn to_rgb565(self) -> Rgb565 { Rgb565::new(quantize(self.r, 31), quantize(self.g, 63), quantize(self.b, 31)) }
}

#[inline]
fn quantize(
    channel: f32,
    max: u8,
) -> u8 {
    (channel.clamp(0.0, 1.0) * f32::from(max) + 0.5) as u8
}

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black. Hub fill.
pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

/// Pure white. Ticks, labels, readouts, hub ring.
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

/// Pure red. Needles and the danger zone.
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

/// Pure green. Normal operating zone.
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

/// Pure yellow. Warning zone.
pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

// =============================================================================
// Bezel Colors
// =============================================================================

/// Dial face. Darkest of the three bezel layers.
pub const BEZEL_FACE: Color = Color::gray(0.1);

/// Bright outer rim.
pub const BEZEL_RIM: Color = Color::gray(0.8);

/// Inner rim, just inside the outer one.
pub const BEZEL_INNER: Color = Color::gray(0.2);

/// Dimmed text for unit strings under the readout.
pub const UNIT_TEXT: Color = Color::gray(0.8);

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;

    #[test]
    fn test_standard_colors_map_to_rgb565_constants() {
        assert_eq!(BLACK.to_rgb565(), Rgb565::BLACK);
        assert_eq!(WHITE.to_rgb565(), Rgb565::WHITE);
        assert_eq!(RED.to_rgb565(), Rgb565::RED);
        assert_eq!(GREEN.to_rgb565(), Rgb565::GREEN);
        assert_eq!(YELLOW.to_rgb565(), Rgb565::YELLOW);
    }

    #[test]
    fn test_out_of_range_channels_clamp() {
        let c = Color::rgb(2.0, -1.0, 0.5);
        assert_eq!(c.to_rgb565(), Rgb565::new(31, 0, 16));
    }

    #[test]
    fn test_bezel_layers_get_lighter_outward() {
        assert!(BEZEL_FACE.r < BEZEL_INNER.r);
        assert!(BEZEL_INNER.r < BEZEL_RIM.r);
    }

    #[test]
    fn test_transparency() {
        assert!(!WHITE.is_transparent());
        assert!(Color { a: 0.0, ..WHITE }.is_transparent());
    }
}
