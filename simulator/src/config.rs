//! Simulator configuration file.
//!
//! An optional TOML file passed with `--config`. Every key has a default, so
//! an empty file (or no file) gives the stock 800x600 setup.
//!
//! ```toml
//! [window]
//! width = 1000
//! height = 800
//! frame_ms = 20
//!
//! [telemetry]
//! velocity_sensor = "car_velocity"
//!
//! [dashboard]
//! anchor = "car"
//!
//! [car]
//! max_speed = 3.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use cluster_common::telemetry::SENSOR_NAME_LENGTH;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub window: WindowConfig,
    pub telemetry: TelemetryConfig,
    pub dashboard: DashboardConfig,
    pub car: CarConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    /// Window pixel scale. Also applied to PNG captures.
    pub scale: u32,
    /// Target frame time in milliseconds. Also the simulation step.
    pub frame_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 1,
            frame_ms: 20,
        }
    }
}

impl WindowConfig {
    #[inline]
    pub const fn frame_time(&self) -> Duration { Duration::from_millis(self.frame_ms) }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Read speed from this sensor instead of the generalized velocities.
    pub velocity_sensor: Option<String>,
}

/// Where the cluster is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Frame center.
    #[default]
    Screen,
    /// Follows the car through the top-down camera.
    Car,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub anchor: AnchorMode,
    /// Top-down camera zoom.
    pub pixels_per_meter: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorMode::Screen,
            pixels_per_meter: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// m/s
    pub max_speed: f64,
    /// m/s²
    pub accel: f64,
    /// rad/s at full steering
    pub turn_rate: f64,
    /// Goal counts as reached inside this distance (m).
    pub goal_tolerance: f64,
    /// Goals respawn uniformly in `[-goal_bound, goal_bound]²`.
    pub goal_bound: f64,
    /// Fixed RNG seed for reproducible goal sequences.
    pub seed: Option<u64>,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            accel: 2.0,
            turn_rate: 2.5,
            goal_tolerance: 0.2,
            goal_bound: 2.0,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return Err(ConfigError::Invalid(format!("window size {}x{} is empty", w.width, w.height)));
        }
        if w.scale == 0 {
            return Err(ConfigError::Invalid("window.scale must be at least 1".into()));
        }
        if w.frame_ms == 0 {
            return Err(ConfigError::Invalid("window.frame_ms must be positive".into()));
        }
        if let Some(name) = &self.telemetry.velocity_sensor {
            if name.is_empty() || name.len() > SENSOR_NAME_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "telemetry.velocity_sensor must be 1..={SENSOR_NAME_LENGTH} bytes"
                )));
            }
        }
        if !(self.dashboard.pixels_per_meter > 0.0) {
            return Err(ConfigError::Invalid("dashboard.pixels_per_meter must be positive".into()));
        }
        let car = &self.car;
        for (key, value) in [
            ("max_speed", car.max_speed),
            ("accel", car.accel),
            ("turn_rate", car.turn_rate),
            ("goal_tolerance", car.goal_tolerance),
            ("goal_bound", car.goal_bound),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("car.{key} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}
