//! Instrument cluster simulator for desktop.
//!
//! Drives a kinematic car through the goal task and draws the scene plus the
//! instrument cluster every frame into an `embedded-graphics-simulator`
//! display. Headless mode runs a fixed number of frames and can save the last
//! one as a PNG; the `window` feature adds a live SDL window.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod camera;
mod car;
mod config;
mod profiling;
mod scene;
mod task;
mod timing;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use cluster_common::{Dashboard, DrawStats, Frame, FrameOutcome, GraphicsSurface, Tee, TelemetrySampler, VelocitySource};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::camera::{SceneAnchor, TopDownCamera};
use crate::car::KinematicCar;
use crate::config::SimConfig;
use crate::profiling::FrameMetrics;
use crate::scene::render_scene;
use crate::task::GoalTask;
use crate::timing::step_seconds;

#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(author, version, about = "Instrument cluster simulator with a drive-to-goal car")]
struct Args {
    /// Config file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render off-screen instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode
    #[arg(short, long, default_value = "300")]
    frames: u32,

    /// Save the last headless frame as a PNG
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

/// Adds the default `info` directives for this binary and the cluster crate.
fn log_filter(base: EnvFilter) -> Result<EnvFilter> {
    Ok(base
        .add_directive(concat!(module_path!(), "=info").parse()?)
        .add_directive("cluster_common=info".parse()?))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(EnvFilter::from_default_env())?)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    info!(
        width = config.window.width,
        height = config.window.height,
        anchor = ?config.dashboard.anchor,
        sensor = ?config.telemetry.velocity_sensor,
        "starting simulator"
    );

    let mut session = Session::new(config);
    if args.headless {
        run_headless(&mut session, args.frames, args.screenshot.as_deref())
    } else {
        run_interactive(&mut session, args.frames)
    }
}

// =============================================================================
// Session
// =============================================================================

/// Everything one simulator run owns.
struct Session {
    config: SimConfig,
    car: KinematicCar,
    task: GoalTask,
    camera: TopDownCamera,
    dashboard: Dashboard<SceneAnchor>,
    display: SimulatorDisplay<Rgb565>,
    frame: Frame,
    metrics: FrameMetrics,
}

impl Session {
    fn new(config: SimConfig) -> Self {
        let camera = TopDownCamera::new(config.dashboard.pixels_per_meter);
        let sampler = match &config.telemetry.velocity_sensor {
            Some(name) => TelemetrySampler::with_source(VelocitySource::sensor(name)),
            None => TelemetrySampler::new(),
        };
        let dashboard =
            Dashboard::with_anchor(SceneAnchor::from_config(&config.dashboard, camera)).with_sampler(sampler);
        let size = Size::new(config.window.width, config.window.height);

        Self {
            car: KinematicCar::new(&config.car),
            task: GoalTask::new(&config.car),
            camera,
            dashboard,
            display: SimulatorDisplay::new(size),
            frame: Frame::sized(size.width, size.height),
            metrics: FrameMetrics::new(),
            config,
        }
    }

    /// Step the simulation and draw one frame.
    #[cfg(test)]
    fn tick(&mut self) -> (FrameOutcome, DrawStats) {
        self.step();
        self.draw()
    }

    fn step(&mut self) {
        let dt = step_seconds(self.config.window.frame_time());
        self.task.step(&mut self.car, dt);
    }

    fn draw(&mut self) -> (FrameOutcome, DrawStats) {
        self.display.clear(Rgb565::BLACK).ok();
        let mut stats = DrawStats::new();
        let mut surface = Tee(GraphicsSurface::new(&mut self.display), &mut stats);
        render_scene(&mut surface, &self.camera, &self.frame, &self.car, &self.task);
        let outcome = self.dashboard.render(&self.car, &self.frame, Some(&mut surface));
        (outcome, stats)
    }

    fn log_summary(&self) {
        let snapshot = self.dashboard.snapshot();
        info!(
            frames = self.metrics.total_frames,
            skipped = self.metrics.skipped_frames,
            last_us = self.metrics.frame_time_us,
            render_us = self.metrics.render_time_us,
            sleep_us = self.metrics.sleep_time_us,
            min_us = self.metrics.frame_time_min_us,
            avg_us = self.metrics.frame_time_avg_us(),
            max_us = self.metrics.frame_time_max_us,
            rects = self.metrics.rects_last_frame,
            texts = self.metrics.texts_last_frame,
            digest = %format!("{:016x}", self.metrics.last_digest),
            goals = self.task.respawns(),
            speed = snapshot.speed,
            car_speed = self.car.speed(),
            residual = ?self.task.residual(&self.car),
            fuel = snapshot.fuel_level,
            uptime = %self.metrics.uptime_string(),
            "frame summary"
        );
    }
}

// =============================================================================
// Run Modes
// =============================================================================

fn run_headless(
    session: &mut Session,
    frames: u32,
    screenshot: Option<&Path>,
) -> Result<()> {
    for _ in 0..frames {
        let frame_start = Instant::now();
        session.step();
        let render_start = Instant::now();
        let (outcome, stats) = session.draw();
        let render_time = render_start.elapsed();
        session
            .metrics
            .record_frame(frame_start.elapsed(), render_time, Duration::ZERO, outcome, &stats);
    }
    session.log_summary();

    if let Some(path) = screenshot {
        let settings = OutputSettingsBuilder::new().scale(session.config.window.scale).build();
        session
            .display
            .to_rgb_output_image(&settings)
            .save_png(path)
            .with_context(|| format!("failed to save screenshot to {}", path.display()))?;
        info!(path = %path.display(), "screenshot saved");
    }
    Ok(())
}

#[cfg(feature = "window")]
fn run_interactive(
    session: &mut Session,
    _frames: u32,
) -> Result<()> {
    use embedded_graphics_simulator::{SimulatorEvent, Window};

    use crate::timing::pace;

    const REPORT_INTERVAL: Duration = Duration::from_secs(5);

    let settings = OutputSettingsBuilder::new().scale(session.config.window.scale).build();
    let mut window = Window::new("Instrument Cluster", &settings);
    let frame_time = session.config.window.frame_time();
    let mut last_report = Instant::now();

    loop {
        let frame_start = Instant::now();
        session.step();
        let render_start = Instant::now();
        let (outcome, stats) = session.draw();
        let render_time = render_start.elapsed();

        window.update(&session.display);
        if window.events().any(|ev| matches!(ev, SimulatorEvent::Quit)) {
            break;
        }

        let sleep_time = pace(frame_start, frame_time);
        session
            .metrics
            .record_frame(frame_start.elapsed(), render_time, sleep_time, outcome, &stats);

        if last_report.elapsed() >= REPORT_INTERVAL {
            session.log_summary();
            last_report = Instant::now();
        }
    }

    session.log_summary();
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_interactive(
    session: &mut Session,
    frames: u32,
) -> Result<()> {
    tracing::warn!("built without the `window` feature, running headless");
    run_headless(session, frames, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnchorMode, CarConfig};

    fn seeded_config() -> SimConfig {
        SimConfig {
            car: CarConfig {
                seed: Some(42),
                ..CarConfig::default()
            },
            ..SimConfig::default()
        }
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["simulator", "--headless", "--frames", "10", "--screenshot", "out.png"]).unwrap();
        assert!(args.headless);
        assert_eq!(args.frames, 10);
        assert_eq!(args.screenshot.as_deref(), Some(Path::new("out.png")));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_tick_draws_cluster_once_built() {
        let mut session = Session::new(seeded_config());
        for _ in 0..5 {
            let (outcome, stats) = session.tick();
            assert_eq!(outcome, FrameOutcome::Drawn);
            assert!(stats.rects() > 0);
        }
        assert_eq!(session.dashboard.builds(), 1);
        assert_eq!(session.dashboard.sampler().samples(), 5);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = Session::new(seeded_config());
        let mut b = Session::new(seeded_config());
        for _ in 0..20 {
            assert_eq!(a.tick().1.digest(), b.tick().1.digest());
        }
    }

    #[test]
    fn test_sensor_source_and_car_anchor() {
        let mut config = seeded_config();
        config.telemetry.velocity_sensor = Some("car_velocity".into());
        config.dashboard.anchor = AnchorMode::Car;
        let mut session = Session::new(config);
        let (outcome, _) = session.tick();
        assert_eq!(outcome, FrameOutcome::Drawn);

        config = seeded_config();
        config.telemetry.velocity_sensor = Some("wheel_speed".into());
        let mut session = Session::new(config);
        let (outcome, stats) = session.tick();
        assert_eq!(outcome, FrameOutcome::MissingState);
        assert_eq!(stats.texts(), 1, "only the scene label is drawn");
    }

    #[test]
    fn test_headless_run_records_metrics() {
        let mut session = Session::new(seeded_config());
        run_headless(&mut session, 3, None).unwrap();
        assert_eq!(session.metrics.total_frames, 3);
        assert_eq!(session.metrics.skipped_frames, 0);
        assert!(session.metrics.render_time_us <= session.metrics.frame_time_us);
        assert!(session.metrics.frame_time_min_us <= session.metrics.frame_time_max_us);
    }

    #[test]
    fn test_default_log_filter_covers_binary_targets() {
        use tracing_subscriber::layer::SubscriberExt;

        let subscriber = tracing_subscriber::registry().with(log_filter(EnvFilter::new("")).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "simulator", tracing::Level::INFO));
            assert!(tracing::enabled!(target: "simulator::task", tracing::Level::INFO));
            assert!(tracing::enabled!(tracing::Level::INFO), "this module must be covered too");
            assert!(tracing::enabled!(target: "cluster_common::dashboard", tracing::Level::INFO));
            assert!(!tracing::enabled!(target: "simulator::task", tracing::Level::DEBUG));
        });
    }
}
