//! Procedural instrument cluster: speedometer, tachometer and fuel gauge.
//!
//! Everything is drawn with two host primitives, fill a rectangle and draw a
//! line of text. Shared between the desktop simulator and any other host
//! that can provide a [`surface::Surface`]:
//!
//! - [`colors`]: RGBA float colors and the cluster palette
//! - [`config`]: Layout and stroke geometry constants
//! - [`thresholds`]: Gauge ranges, color zones, telemetry factors
//! - [`surface`]: Host surface trait and pixel geometry
//! - [`widgets`]: Drawing primitives and the gauge widget
//! - [`telemetry`]: Simulation state trait and telemetry sampler
//! - [`layout`]: Frame rectangle, anchor strategies, gauge placement
//! - [`dashboard`]: Per-frame controller owning the three gauges
//! - [`display`]: Adapter for `embedded-graphics` draw targets
//! - [`profiling`]: Counting/hashing surface for headless runs
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. Floating point math goes through
//! `micromath`, strings through `heapless`.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod layout;
pub mod profiling;
pub mod surface;
pub mod telemetry;
pub mod thresholds;
pub mod widgets;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use colors::Color;
pub use dashboard::{Dashboard, FrameOutcome};
pub use display::GraphicsSurface;
pub use layout::{AnchorStrategy, ClusterLayout, Frame, ProjectedAnchor, Projector, ScreenCentered};
pub use profiling::{DrawStats, Tee};
pub use surface::{Font, Rect, Surface, Vec2};
pub use telemetry::{SimState, TelemetrySampler, TelemetrySnapshot, VelocitySource};
pub use widgets::{Gauge, GaugeKind};
