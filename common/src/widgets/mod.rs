//! Widget components for the instrument cluster.
//!
//! All widgets draw through [`crate::surface::Surface`] and never hold on to it.

mod gauge;
mod primitives;

pub use gauge::{
    ArcSegment,
    FUEL_GAUGE,
    Gauge,
    GaugeKind,
    GaugeSpec,
    SPEEDOMETER,
    Scale,
    TACHOMETER,
    ZONE_COUNT,
    Zone,
};
pub use primitives::{draw_arc, draw_circle, draw_filled_circle, draw_needle, stroke_width, tile_arc, tile_disc, tile_segment};
