//! Layout and drawing configuration constants.
//!
//! All distances are host pixels. The cluster is laid out around an anchor
//! point (screen center by default, see [`crate::layout`]): the speedometer
//! sits at the anchor, the two small gauges flank it on either side.

// =============================================================================
// Cluster Layout
// =============================================================================

/// Vertical shift applied to the anchor before placing gauges.
/// Subtracted in y-up host coordinates.
pub const DASHBOARD_LIFT: f32 = 100.0;

/// Radius of the central speedometer.
pub const SPEEDOMETER_RADIUS: f32 = 150.0;

/// Radius of the tachometer and fuel gauge.
pub const SMALL_GAUGE_RADIUS: f32 = 80.0;

/// Clear gap between the speedometer rim and a small gauge rim.
pub const GAUGE_GAP: f32 = 20.0;

/// Horizontal distance from the speedometer center to each small gauge center.
pub const SIDE_GAUGE_OFFSET: f32 = SPEEDOMETER_RADIUS + SMALL_GAUGE_RADIUS + GAUGE_GAP;

// =============================================================================
// Anchor Lookup
// =============================================================================

/// Site marking where the cluster should float in world space.
pub const DASHBOARD_MARKER_SITE: &str = "dashboard_marker";

/// Body used when the marker site is missing.
pub const CAR_BODY: &str = "car";

/// Velocity sensor attached to the car body in the goal task model.
pub const CAR_VELOCITY_SENSOR: &str = "car_velocity";

// =============================================================================
// Stroke Geometry
// =============================================================================

/// Arc and ring stroke width as a fraction of the radius.
pub const ARC_STROKE_FRACTION: f32 = 0.05;

/// Thinnest stroke the primitive layer will emit.
pub const MIN_STROKE: f32 = 1.0;

// =============================================================================
// Dial Geometry (shared by all gauges)
// =============================================================================

/// Inner bezel ring distance from the outer rim.
pub const BEZEL_INNER_INSET: f32 = 5.0;

/// Tick mark distance from the outer rim.
pub const TICK_INSET: f32 = 10.0;

/// Tick mark square side.
pub const TICK_SIZE: f32 = 3.0;

/// Readout baseline above the gauge center.
pub const READOUT_RAISE: f32 = 5.0;

/// Unit string baseline below the gauge center.
pub const UNIT_DROP: f32 = 15.0;

/// Gauge name distance below the outer rim.
pub const NAME_DROP: f32 = 10.0;

const _: () = assert!(BEZEL_INNER_INSET < TICK_INSET);
const _: () = assert!(SMALL_GAUGE_RADIUS < SPEEDOMETER_RADIUS);
