//! Telemetry sampling from simulation state.
//!
//! The sampler turns raw simulation state into a [`TelemetrySnapshot`] once per
//! frame: speed from the velocity magnitude, RPM as a flat multiple of speed,
//! and a fuel level that drains by a fixed amount per successful sample.
//!
//! # Missing State
//!
//! When the velocity is unavailable (too few generalized velocities, sensor
//! not found, non-finite values) the sample is skipped: no fuel is burned,
//! the last snapshot is kept, and `None` is returned.

#[allow(unused_imports)]
use micromath::F32Ext;
use tracing::trace;

use crate::thresholds::{FUEL_BURN_PER_SAMPLE, FUEL_MAX, FUEL_MIN, MS_TO_KMH, RPM_MAX, RPM_MIN, RPM_PER_KMH};

/// Longest sensor name a [`VelocitySource`] can hold.
pub const SENSOR_NAME_LENGTH: usize = 32;

pub type SensorName = heapless::String<SENSOR_NAME_LENGTH>;

// =============================================================================
// Simulation State
// =============================================================================

/// Read-only view of the simulation for one frame.
///
/// Positions are world coordinates. Lookups by name return `None` when the
/// model has no such element.
pub trait SimState {
    /// Generalized velocities. The first three are the root linear velocity.
    fn qvel(&self) -> &[f64];

    /// Reading of a 3-axis sensor.
    fn sensor(
        &self,
        name: &str,
    ) -> Option<[f64; 3]>;

    fn site_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]>;

    fn body_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]>;
}

/// Where the sampler reads linear velocity from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VelocitySource {
    /// First three generalized velocities.
    #[default]
    GeneralizedVelocity,
    /// A named 3-axis velocity sensor.
    Sensor(SensorName),
}

impl VelocitySource {
    /// Sensor source by name. Names longer than [`SENSOR_NAME_LENGTH`] are
    /// truncated.
    pub fn sensor(name: &str) -> Self {
        let mut stored = SensorName::new();
        for c in name.chars() {
            if stored.push(c).is_err() {
                break;
            }
        }
        Self::Sensor(stored)
    }

    fn read<M>(
        &self,
        sim: &M,
    ) -> Option<[f64; 3]>
    where
        M: SimState + ?Sized,
    {
        match self {
            Self::GeneralizedVelocity => match sim.qvel() {
                [x, y, z, ..] => Some([*x, *y, *z]),
                _ => None,
            },
            Self::Sensor(name) => sim.sensor(name),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Derived telemetry for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    /// km/h, never negative.
    pub speed: f32,
    /// Clamped to `[RPM_MIN, RPM_MAX]`.
    pub rpm: f32,
    /// Percent, clamped to `[FUEL_MIN, FUEL_MAX]`.
    pub fuel_level: f32,
}

impl TelemetrySnapshot {
    /// Car at rest with a full tank.
    pub const fn new() -> Self {
        Self {
            speed: 0.0,
            rpm: RPM_MIN,
            fuel_level: FUEL_MAX,
        }
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self { Self::new() }
}

/// Speed in km/h from a linear velocity in m/s. `None` if any axis is not finite.
pub fn speed_kmh(velocity: [f64; 3]) -> Option<f32> {
    if !velocity.iter().all(|v| v.is_finite()) {
        return None;
    }
    let [x, y, z] = velocity.map(|v| v as f32);
    let speed = (x * x + y * y + z * z).sqrt() * MS_TO_KMH;
    speed.is_finite().then_some(speed)
}

/// Engine RPM proxy for a speed in km/h.
#[inline]
pub fn rpm_for_speed(speed_kmh: f32) -> f32 { (speed_kmh * RPM_PER_KMH).clamp(RPM_MIN, RPM_MAX) }

/// Fuel left after `samples` successful samples from a full tank.
#[inline]
pub fn fuel_after(samples: u32) -> f32 { (FUEL_MAX - samples as f32 * FUEL_BURN_PER_SAMPLE).clamp(FUEL_MIN, FUEL_MAX) }

// =============================================================================
// Sampler
// =============================================================================

/// Per-frame telemetry sampler. Starts with a full tank.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySampler {
    source: VelocitySource,
    samples: u32,
    snapshot: TelemetrySnapshot,
}

impl TelemetrySampler {
    pub const fn new() -> Self {
        Self {
            source: VelocitySource::GeneralizedVelocity,
            samples: 0,
            snapshot: TelemetrySnapshot::new(),
        }
    }

    pub fn with_source(source: VelocitySource) -> Self {
        Self {
            source,
            ..Self::new()
        }
    }

    #[inline]
    pub const fn source(&self) -> &VelocitySource { &self.source }

    /// Last successful snapshot (the initial one before any sample).
    #[inline]
    pub const fn snapshot(&self) -> TelemetrySnapshot { self.snapshot }

    /// Successful samples taken so far.
    #[inline]
    pub const fn samples(&self) -> u32 { self.samples }

    /// Sample the simulation. Returns `None` and changes nothing when the
    /// velocity is unavailable.
    pub fn sample<M>(
        &mut self,
        sim: &M,
    ) -> Option<TelemetrySnapshot>
    where
        M: SimState + ?Sized,
    {
        let Some(speed) = self.source.read(sim).and_then(speed_kmh) else {
            trace!(source = ?self.source, "velocity unavailable, sample skipped");
            return None;
        };

        self.samples = self.samples.saturating_add(1);
        self.snapshot = TelemetrySnapshot {
            speed,
            rpm: rpm_for_speed(speed),
            fuel_level: fuel_after(self.samples),
        };
        Some(self.snapshot)
    }
}

impl Default for TelemetrySampler {
    fn default() -> Self { Self::new() }
}
