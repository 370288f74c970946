//! Dial gauges: speedometer, tachometer and fuel gauge.
//!
//! The three gauges share one render routine. What differs between them is
//! data: the [`Scale`] (range, tick count, color zones, direction) and a few
//! dial proportions in [`GaugeSpec`]. [`GaugeKind::spec`] picks the data.
//!
//! # Drawing Order
//!
//! 1. Bezel: face disc, outer rim, inner rim
//! 2. Tick squares and numeric labels along a semicircle
//! 3. Status arc, one segment per zone reached so far
//! 4. Needle
//! 5. Hub, readout, unit, gauge name
//!
//! # Scale Direction
//!
//! Normal scales run from `-π/2` (bottom) to `+π/2` (top). The fuel scale is
//! inverted and runs from `+π/2` down to `-π/2`.

use core::f32::consts::FRAC_PI_2;
use core::fmt::Write;

use heapless::String;

use super::primitives::{draw_arc, draw_circle, draw_filled_circle, draw_needle};
use crate::colors::{BEZEL_FACE, BEZEL_INNER, BEZEL_RIM, BLACK, Color, GREEN, RED, UNIT_TEXT, WHITE, YELLOW};
use crate::config::{BEZEL_INNER_INSET, NAME_DROP, READOUT_RAISE, TICK_INSET, TICK_SIZE, UNIT_DROP};
use crate::surface::{Font, Rect, Surface, Vec2};
use crate::thresholds::{
    FUEL_LOW,
    FUEL_MAX,
    FUEL_MIN,
    FUEL_OK,
    RPM_DANGER,
    RPM_MAX,
    RPM_MIN,
    RPM_WARN,
    SPEED_DANGER,
    SPEED_MAX,
    SPEED_MIN,
    SPEED_WARN,
};

/// Number of color zones on every scale.
pub const ZONE_COUNT: usize = 3;

// =============================================================================
// Scale
// =============================================================================

/// A colored sub-range of a scale, from `from` up to the next zone's start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub from: f32,
    pub color: Color,
}

/// One drawn piece of the status arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: f32,
    pub end: f32,
    pub color: Color,
}

impl ArcSegment {
    /// True when the segment spans no angle (value sits on its zone start).
    #[inline]
    #[allow(clippy::float_cmp)]
    pub fn is_empty(&self) -> bool { self.start == self.end }
}

/// Fixed semicircular scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f32,
    pub max: f32,
    /// Tick marks including both ends.
    pub marks: u8,
    /// Label every n-th tick, starting with the first.
    pub label_every: u8,
    /// Tick labels are divided by this before printing.
    pub label_divisor: f32,
    pub inverted: bool,
    /// Zones in ascending value order. The first starts at `min`.
    pub zones: [Zone; ZONE_COUNT],
}

impl Scale {
    /// Angle of `min`.
    #[inline]
    pub const fn start_angle(&self) -> f32 { if self.inverted { FRAC_PI_2 } else { -FRAC_PI_2 } }

    /// Angle of `max`.
    #[inline]
    pub const fn end_angle(&self) -> f32 { -self.start_angle() }

    /// Clamp into `[min, max]`. NaN reads as `min`.
    pub fn clamp(
        &self,
        value: f32,
    ) -> f32 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Needle angle for `value`, linear over the scale.
    pub fn angle_of(
        &self,
        value: f32,
    ) -> f32 {
        let t = (self.clamp(value) - self.min) / (self.max - self.min);
        let start = self.start_angle();
        start + (self.end_angle() - start) * t
    }

    /// Index of the zone `value` falls in. Boundaries belong to the higher zone.
    pub fn zone_index(
        &self,
        value: f32,
    ) -> usize {
        let value = self.clamp(value);
        self.zones.iter().rposition(|z| value >= z.from).unwrap_or(0)
    }

    /// Status arc segments from `min` up to `value`.
    ///
    /// Every zone the value has reached contributes one segment; the zone the
    /// value is in ends at the value. Zones above the value are left out.
    pub fn segments(
        &self,
        value: f32,
    ) -> heapless::Vec<ArcSegment, ZONE_COUNT> {
        let value = self.clamp(value);
        let mut out = heapless::Vec::new();
        for (i, zone) in self.zones.iter().enumerate() {
            if value < zone.from {
                break;
            }
            let upper = self.zones.get(i + 1).map_or(self.max, |next| next.from);
            let segment = ArcSegment {
                start: self.angle_of(zone.from),
                end: self.angle_of(value.min(upper)),
                color: zone.color,
            };
            out.push(segment).ok();
        }
        out
    }
}

// =============================================================================
// Gauge Variants
// =============================================================================

/// Dial proportions and text for one gauge variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSpec {
    pub name: &'static str,
    pub unit: &'static str,
    pub scale: Scale,
    /// Readout value is divided by this before printing.
    pub readout_divisor: f32,
    pub label_inset: f32,
    pub arc_inset: f32,
    pub needle_inset: f32,
    pub needle_width: f32,
    pub hub_radius: f32,
}

/// 0-240 km/h, 13 ticks every 20 km/h, labels every 40.
pub const SPEEDOMETER: GaugeSpec = GaugeSpec {
    name: "SPEED",
    unit: "km/h",
    scale: Scale {
        min: SPEED_MIN,
        max: SPEED_MAX,
        marks: 13,
        label_every: 2,
        label_divisor: 1.0,
        inverted: false,
        zones: [
            Zone { from: SPEED_MIN, color: GREEN },
            Zone { from: SPEED_WARN, color: YELLOW },
            Zone { from: SPEED_DANGER, color: RED },
        ],
    },
    readout_divisor: 1.0,
    label_inset: 30.0,
    arc_inset: 20.0,
    needle_inset: 40.0,
    needle_width: 5.0,
    hub_radius: 15.0,
};

/// 0-8000 RPM, a tick and label every 1000 (printed in thousands).
pub const TACHOMETER: GaugeSpec = GaugeSpec {
    name: "TACH",
    unit: "RPM",
    scale: Scale {
        min: RPM_MIN,
        max: RPM_MAX,
        marks: 9,
        label_every: 2,
        label_divisor: 1000.0,
        inverted: false,
        zones: [
            Zone { from: RPM_MIN, color: GREEN },
            Zone { from: RPM_WARN, color: YELLOW },
            Zone { from: RPM_DANGER, color: RED },
        ],
    },
    readout_divisor: 1000.0,
    label_inset: 25.0,
    arc_inset: 15.0,
    needle_inset: 30.0,
    needle_width: 4.0,
    hub_radius: 10.0,
};

/// 0-100 %, 11 ticks every 10 %, labels every 20. Low fuel is RED.
pub const FUEL_GAUGE: GaugeSpec = GaugeSpec {
    name: "FUEL",
    unit: "%",
    scale: Scale {
        min: FUEL_MIN,
        max: FUEL_MAX,
        marks: 11,
        label_every: 2,
        label_divisor: 1.0,
        inverted: true,
        zones: [
            Zone { from: FUEL_MIN, color: RED },
            Zone { from: FUEL_LOW, color: YELLOW },
            Zone { from: FUEL_OK, color: GREEN },
        ],
    },
    readout_divisor: 1.0,
    label_inset: 25.0,
    arc_inset: 15.0,
    needle_inset: 30.0,
    needle_width: 4.0,
    hub_radius: 10.0,
};

/// Which gauge a [`Gauge`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GaugeKind {
    Speedometer,
    Tachometer,
    FuelGauge,
}

impl GaugeKind {
    /// Scale and dial proportions for this variant.
    pub const fn spec(self) -> &'static GaugeSpec {
        match self {
            Self::Speedometer => &SPEEDOMETER,
            Self::Tachometer => &TACHOMETER,
            Self::FuelGauge => &FUEL_GAUGE,
        }
    }
}

// =============================================================================
// Gauge Widget
// =============================================================================

/// A dial gauge at a screen position.
///
/// `update` stores the latest value; `render` draws it and can be called any
/// number of times without changing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    kind: GaugeKind,
    center: Vec2,
    radius: f32,
    value: f32,
}

impl Gauge {
    pub const fn new(
        kind: GaugeKind,
        center: Vec2,
        radius: f32,
    ) -> Self {
        Self {
            kind,
            center,
            radius,
            value: 0.0,
        }
    }

    #[inline]
    pub const fn kind(&self) -> GaugeKind { self.kind }

    #[inline]
    pub const fn center(&self) -> Vec2 { self.center }

    #[inline]
    pub const fn radius(&self) -> f32 { self.radius }

    /// Last value passed to [`update`](Self::update), unclamped.
    #[inline]
    pub const fn value(&self) -> f32 { self.value }

    /// Move the gauge. Size and value are kept.
    pub fn set_position(
        &mut self,
        center: Vec2,
    ) {
        self.center = center;
    }

    /// Store the latest reading.
    pub fn update(
        &mut self,
        value: f32,
    ) {
        self.value = value;
    }

    #[inline]
    pub fn clamped_value(&self) -> f32 { self.kind.spec().scale.clamp(self.value) }

    #[inline]
    pub fn needle_angle(&self) -> f32 { self.kind.spec().scale.angle_of(self.value) }

    /// Zone the current value falls in.
    pub fn zone(&self) -> Zone {
        let scale = &self.kind.spec().scale;
        scale.zones[scale.zone_index(self.value)]
    }

    #[inline]
    pub fn status_segments(&self) -> heapless::Vec<ArcSegment, ZONE_COUNT> { self.kind.spec().scale.segments(self.value) }

    /// Draw the gauge. With no surface this is a no-op.
    pub fn render<S>(
        &self,
        surface: Option<&mut S>,
    ) where
        S: Surface + ?Sized,
    {
        let Some(surface) = surface else {
            return;
        };
        let spec = self.kind.spec();
        let center = self.center;
        let radius = self.radius;

        draw_filled_circle(surface, center, radius, BEZEL_FACE);
        draw_circle(surface, center, radius, BEZEL_RIM);
        draw_circle(surface, center, radius - BEZEL_INNER_INSET, BEZEL_INNER);

        self.draw_scale(surface, spec);

        for segment in self.status_segments().iter().filter(|s| !s.is_empty()) {
            draw_arc(surface, center, radius - spec.arc_inset, segment.start, segment.end, segment.color);
        }

        let tip = center.polar(radius - spec.needle_inset, self.needle_angle());
        draw_needle(surface, center, tip, spec.needle_width, RED);

        draw_filled_circle(surface, center, spec.hub_radius, BLACK);
        draw_circle(surface, center, spec.hub_radius, WHITE);

        let mut readout: String<16> = String::new();
        // Adding zero turns -0.0 into 0.0 so the readout never shows "-0"
        let _ = write!(readout, "{:.0}", self.clamped_value() / spec.readout_divisor + 0.0);
        surface.draw_text(Font::Big, &readout, center.x, center.y + READOUT_RAISE, WHITE);
        surface.draw_text(Font::Normal, spec.unit, center.x, center.y - UNIT_DROP, UNIT_TEXT);
        surface.draw_text(Font::Normal, spec.name, center.x, center.y - radius - NAME_DROP, WHITE);
    }

    fn draw_scale<S>(
        &self,
        surface: &mut S,
        spec: &GaugeSpec,
    ) where
        S: Surface + ?Sized,
    {
        let scale = &spec.scale;
        let start = scale.start_angle();
        let sweep = scale.end_angle() - start;
        let intervals = f32::from(scale.marks.saturating_sub(1).max(1));
        let label_every = scale.label_every.max(1);

        for i in 0..scale.marks {
            let t = f32::from(i) / intervals;
            let angle = start + sweep * t;
            let mark = self.center.polar(self.radius - TICK_INSET, angle);
            surface.fill_rect(Rect::centered_square(mark, TICK_SIZE), WHITE);

            if i % label_every == 0 {
                let tick_value = scale.min + (scale.max - scale.min) * t;
                let mut label: String<12> = String::new();
                let _ = write!(label, "{:.0}", tick_value / scale.label_divisor);
                let at = self.center.polar(self.radius - spec.label_inset, angle);
                surface.draw_text(Font::Normal, &label, at.x, at.y, WHITE);
            }
        }
    }
}
