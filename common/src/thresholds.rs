//! Gauge ranges, color zone thresholds and telemetry conversion factors.
//!
//! All thresholds are compile-time constants with validation assertions.
//! Gauge scales, zone coloring and the telemetry sampler all read from here,
//! so the numbers on the dial and the numbers driving it cannot drift apart.
//!
//! # Compile-Time Validation
//!
//! Each group includes `const` assertions that verify ordering. A zone
//! threshold outside its scale, or out of order, fails the build.
//!
//! # Zone Boundaries
//!
//! A value exactly on a threshold belongs to the zone that starts there
//! (the higher one). Checks are `value >= threshold`.

// =============================================================================
// Speedometer (km/h)
// =============================================================================

/// Bottom of the speed scale.
pub const SPEED_MIN: f32 = 0.0;

/// Top of the speed scale. Higher speeds pin the needle.
pub const SPEED_MAX: f32 = 240.0;

/// Speed where the arc turns from GREEN to YELLOW.
pub const SPEED_WARN: f32 = 80.0;

/// Speed where the arc turns from YELLOW to RED.
pub const SPEED_DANGER: f32 = 160.0;

const _: () = assert!(SPEED_MIN < SPEED_WARN);
const _: () = assert!(SPEED_WARN < SPEED_DANGER);
const _: () = assert!(SPEED_DANGER < SPEED_MAX);

// =============================================================================
// Tachometer (RPM)
// =============================================================================

/// Bottom of the RPM scale.
pub const RPM_MIN: f32 = 0.0;

/// Redline ceiling. The sampler clamps estimated RPM here as well.
pub const RPM_MAX: f32 = 8000.0;

/// RPM where the arc turns from GREEN to YELLOW.
pub const RPM_WARN: f32 = 4000.0;

/// RPM where the arc turns from YELLOW to RED.
pub const RPM_DANGER: f32 = 6000.0;

const _: () = assert!(RPM_MIN < RPM_WARN);
const _: () = assert!(RPM_WARN < RPM_DANGER);
const _: () = assert!(RPM_DANGER < RPM_MAX);

// =============================================================================
// Fuel Gauge (percent)
// =============================================================================

/// Empty tank.
pub const FUEL_MIN: f32 = 0.0;

/// Full tank. The sampler starts here.
pub const FUEL_MAX: f32 = 100.0;

/// Below this the arc is RED (reserve).
pub const FUEL_LOW: f32 = 25.0;

/// At or above this the arc is GREEN. Between LOW and OK it is YELLOW.
pub const FUEL_OK: f32 = 75.0;

const _: () = assert!(FUEL_MIN < FUEL_LOW);
const _: () = assert!(FUEL_LOW < FUEL_OK);
const _: () = assert!(FUEL_OK < FUEL_MAX);

// =============================================================================
// Telemetry Conversion
// =============================================================================

/// Meters per second to kilometers per hour.
pub const MS_TO_KMH: f32 = 3.6;

/// Engine RPM per km/h. A flat proxy, not a gearing model.
pub const RPM_PER_KMH: f32 = 100.0;

/// Fuel burned per successful telemetry sample (percent of tank).
pub const FUEL_BURN_PER_SAMPLE: f32 = 0.001;

const _: () = assert!(FUEL_BURN_PER_SAMPLE > 0.0);

// =============================================================================
// Unit Tests
// =============================================================================
