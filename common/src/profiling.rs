//! Draw statistics for headless runs.
//!
//! [`DrawStats`] is a two-primitive [`Surface`] that draws nothing. It counts
//! calls and folds every command into a running FNV-1a hash, so two frames can
//! be compared for identical output without a framebuffer. Curves reach it
//! through the rectangle tiling fallbacks, the same as any minimal host.
//!
//! [`Tee`] forwards every call to two surfaces, e.g. a display and a
//! `DrawStats`.

use crate::colors::Color;
use crate::surface::{ArcStroke, Font, Rect, Surface, Vec2};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const TAG_RECT: u8 = 1;
const TAG_TEXT: u8 = 2;

// =============================================================================
// Draw Statistics
// =============================================================================

/// Counting, hashing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStats {
    rects: u32,
    texts: u32,
    hash: u64,
}

impl DrawStats {
    pub const fn new() -> Self {
        Self {
            rects: 0,
            texts: 0,
            hash: FNV_OFFSET,
        }
    }

    #[inline]
    pub const fn rects(&self) -> u32 { self.rects }

    #[inline]
    pub const fn texts(&self) -> u32 { self.texts }

    /// Hash of every command since the last reset.
    #[inline]
    pub const fn digest(&self) -> u64 { self.hash }

    pub fn reset(&mut self) { *self = Self::new(); }

    fn feed(
        &mut self,
        bytes: &[u8],
    ) {
        for &b in bytes {
            self.hash ^= u64::from(b);
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    fn feed_color(
        &mut self,
        color: Color,
    ) {
        for channel in [color.r, color.g, color.b, color.a] {
            self.feed(&channel.to_bits().to_le_bytes());
        }
    }
}

impl Default for DrawStats {
    fn default() -> Self { Self::new() }
}

impl Surface for DrawStats {
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    ) {
        self.rects = self.rects.saturating_add(1);
        self.feed(&[TAG_RECT]);
        self.feed(&rect.left.to_le_bytes());
        self.feed(&rect.bottom.to_le_bytes());
        self.feed(&rect.width.to_le_bytes());
        self.feed(&rect.height.to_le_bytes());
        self.feed_color(color);
    }

    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) {
        self.texts = self.texts.saturating_add(1);
        self.feed(&[TAG_TEXT, font as u8]);
        self.feed(text.as_bytes());
        // Terminator keeps "1" + "23" apart from "12" + "3"
        self.feed(&[0]);
        self.feed(&x.to_bits().to_le_bytes());
        self.feed(&y.to_bits().to_le_bytes());
        self.feed_color(color);
    }
}

// =============================================================================
// Fan-out
// =============================================================================

/// Forwards every call to both surfaces, first `.0` then `.1`.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Surface, B: Surface> Surface for Tee<A, B> {
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    ) {
        self.0.fill_rect(rect, color);
        self.1.fill_rect(rect, color);
    }

    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) {
        self.0.draw_text(font, text, x, y, color);
        self.1.draw_text(font, text, x, y, color);
    }

    fn stroke_arc(
        &mut self,
        arc: ArcStroke,
        color: Color,
    ) {
        self.0.stroke_arc(arc, color);
        self.1.stroke_arc(arc, color);
    }

    fn fill_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
    ) {
        self.0.fill_disc(center, radius, color);
        self.1.fill_disc(center, radius, color);
    }

    fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) {
        self.0.stroke_segment(from, to, width, color);
        self.1.stroke_segment(from, to, width, color);
    }
}
