//! Dashboard controller.
//!
//! Owns the telemetry sampler and the three gauges, and drives them once per
//! frame:
//!
//! 1. Sample telemetry. Missing state skips the whole frame.
//! 2. Lay the cluster out around the anchor.
//! 3. Build the gauges on the first drawn frame, reposition them afterwards.
//! 4. Update and render speedometer, tachometer, fuel gauge, in that order.
//!
//! Without a surface the gauges are still updated, only drawing is skipped.

use tracing::{debug, trace};

use crate::config::{SMALL_GAUGE_RADIUS, SPEEDOMETER_RADIUS};
use crate::layout::{AnchorStrategy, ClusterLayout, Frame, ScreenCentered};
use crate::surface::Surface;
use crate::telemetry::{SimState, TelemetrySampler, TelemetrySnapshot};
use crate::widgets::{Gauge, GaugeKind};

/// What happened to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Gauges updated and drawn.
    Drawn,
    /// Gauges updated, no surface to draw on.
    Hidden,
    /// Telemetry unavailable, frame skipped.
    MissingState,
}

/// The three gauges of the cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSet {
    pub speedometer: Gauge,
    pub tachometer: Gauge,
    pub fuel_gauge: Gauge,
}

impl GaugeSet {
    fn new(layout: &ClusterLayout) -> Self {
        Self {
            speedometer: Gauge::new(GaugeKind::Speedometer, layout.speedometer, SPEEDOMETER_RADIUS),
            tachometer: Gauge::new(GaugeKind::Tachometer, layout.tachometer, SMALL_GAUGE_RADIUS),
            fuel_gauge: Gauge::new(GaugeKind::FuelGauge, layout.fuel_gauge, SMALL_GAUGE_RADIUS),
        }
    }

    fn reposition(
        &mut self,
        layout: &ClusterLayout,
    ) {
        self.speedometer.set_position(layout.speedometer);
        self.tachometer.set_position(layout.tachometer);
        self.fuel_gauge.set_position(layout.fuel_gauge);
    }

    /// Gauges in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Gauge> { [&self.speedometer, &self.tachometer, &self.fuel_gauge].into_iter() }

    fn drive<S>(
        &mut self,
        snapshot: &TelemetrySnapshot,
        mut surface: Option<&mut S>,
    ) where
        S: Surface + ?Sized,
    {
        let readings = [
            (&mut self.speedometer, snapshot.speed),
            (&mut self.tachometer, snapshot.rpm),
            (&mut self.fuel_gauge, snapshot.fuel_level),
        ];
        for (gauge, value) in readings {
            gauge.update(value);
            gauge.render(surface.as_deref_mut());
        }
    }
}

/// Per-frame instrument cluster controller.
#[derive(Debug, Clone)]
pub struct Dashboard<A = ScreenCentered> {
    sampler: TelemetrySampler,
    anchor: A,
    gauges: Option<GaugeSet>,
    builds: u32,
    last_frame: Option<Frame>,
}

impl Dashboard<ScreenCentered> {
    /// Screen-centered dashboard reading generalized velocities.
    pub fn new() -> Self { Self::with_anchor(ScreenCentered) }
}

impl Default for Dashboard<ScreenCentered> {
    fn default() -> Self { Self::new() }
}

impl<A: AnchorStrategy> Dashboard<A> {
    pub fn with_anchor(anchor: A) -> Self {
        Self {
            sampler: TelemetrySampler::new(),
            anchor,
            gauges: None,
            builds: 0,
            last_frame: None,
        }
    }

    /// Replace the sampler, e.g. to read a velocity sensor.
    #[must_use]
    pub fn with_sampler(
        mut self,
        sampler: TelemetrySampler,
    ) -> Self {
        self.sampler = sampler;
        self
    }

    /// Gauges, once the first frame has been sampled.
    #[inline]
    pub const fn gauges(&self) -> Option<&GaugeSet> { self.gauges.as_ref() }

    /// How many times the gauge set was constructed. At most 1.
    #[inline]
    pub const fn builds(&self) -> u32 { self.builds }

    #[inline]
    pub const fn snapshot(&self) -> TelemetrySnapshot { self.sampler.snapshot() }

    #[inline]
    pub const fn sampler(&self) -> &TelemetrySampler { &self.sampler }

    #[inline]
    pub const fn anchor(&self) -> &A { &self.anchor }

    #[inline]
    pub fn anchor_mut(&mut self) -> &mut A { &mut self.anchor }

    /// Run one frame.
    pub fn render<M, S>(
        &mut self,
        sim: &M,
        frame: &Frame,
        surface: Option<&mut S>,
    ) -> FrameOutcome
    where
        M: SimState + ?Sized,
        S: Surface + ?Sized,
    {
        let Some(snapshot) = self.sampler.sample(sim) else {
            trace!("telemetry missing, frame skipped");
            return FrameOutcome::MissingState;
        };

        if self.last_frame != Some(*frame) {
            if let Some(previous) = self.last_frame {
                debug!(
                    from_width = previous.width,
                    from_height = previous.height,
                    width = frame.width,
                    height = frame.height,
                    "frame resized"
                );
            }
            self.last_frame = Some(*frame);
        }

        let layout = ClusterLayout::around(self.anchor.anchor(sim, frame));
        let builds = &mut self.builds;
        let gauges = self.gauges.get_or_insert_with(|| {
            *builds += 1;
            debug!(width = frame.width, height = frame.height, "gauges created");
            GaugeSet::new(&layout)
        });
        gauges.reposition(&layout);

        let drawn = surface.is_some();
        gauges.drive(&snapshot, surface);
        if drawn { FrameOutcome::Drawn } else { FrameOutcome::Hidden }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RED;
    use crate::surface::Vec2;
    use crate::testing::{FakeSim, Recorder, assert_close};

    fn draw(
        dash: &mut Dashboard,
        sim: &FakeSim,
        frame: Frame,
    ) -> (FrameOutcome, Recorder) {
        let mut rec = Recorder::new();
        let outcome = dash.render(sim, &frame, Some(&mut rec));
        (outcome, rec)
    }

    #[test]
    fn test_first_frame_builds_gauges() {
        let mut dash = Dashboard::new();
        assert!(dash.gauges().is_none());
        let (outcome, rec) = draw(&mut dash, &FakeSim::moving(10.0), Frame::sized(800, 600));
        assert_eq!(outcome, FrameOutcome::Drawn);
        assert_eq!(dash.builds(), 1);
        assert!(!rec.commands.is_empty());

        let gauges = dash.gauges().unwrap();
        assert_eq!(gauges.speedometer.center(), Vec2::new(400.0, 200.0));
        assert_eq!(gauges.tachometer.center(), Vec2::new(150.0, 200.0));
        assert_eq!(gauges.fuel_gauge.center(), Vec2::new(650.0, 200.0));
    }

    #[test]
    fn test_resize_repositions_without_rebuilding() {
        let mut dash = Dashboard::new();
        draw(&mut dash, &FakeSim::moving(10.0), Frame::sized(800, 600));
        draw(&mut dash, &FakeSim::moving(20.0), Frame::sized(1000, 800));
        assert_eq!(dash.builds(), 1, "resize must not rebuild gauges");

        let gauges = dash.gauges().unwrap();
        assert_close(gauges.speedometer.value(), 72.0);
        assert_close(gauges.fuel_gauge.value(), 99.998);
        assert_eq!(gauges.speedometer.center(), Vec2::new(500.0, 300.0));
        assert_eq!(gauges.tachometer.center(), Vec2::new(250.0, 300.0));
        assert_eq!(gauges.fuel_gauge.center(), Vec2::new(750.0, 300.0));
        assert_close(gauges.speedometer.radius(), 150.0);
    }

    #[test]
    fn test_missing_state_skips_frame() {
        let mut dash = Dashboard::new();
        let (outcome, rec) = draw(&mut dash, &FakeSim::default(), Frame::sized(800, 600));
        assert_eq!(outcome, FrameOutcome::MissingState);
        assert!(rec.commands.is_empty());
        assert!(dash.gauges().is_none());
        assert_eq!(dash.sampler().samples(), 0);
    }

    #[test]
    fn test_missing_state_after_build_keeps_gauges() {
        let mut dash = Dashboard::new();
        draw(&mut dash, &FakeSim::moving(10.0), Frame::sized(800, 600));
        let (outcome, rec) = draw(&mut dash, &FakeSim::default(), Frame::sized(800, 600));
        assert_eq!(outcome, FrameOutcome::MissingState);
        assert!(rec.commands.is_empty());
        assert_close(dash.gauges().unwrap().speedometer.value(), 36.0);
    }

    #[test]
    fn test_no_surface_still_updates() {
        let mut dash = Dashboard::new();
        let outcome = dash.render::<_, Recorder>(&FakeSim::moving(20.0), &Frame::sized(800, 600), None);
        assert_eq!(outcome, FrameOutcome::Hidden);
        let gauges = dash.gauges().unwrap();
        assert_close(gauges.speedometer.value(), 72.0);
        assert_close(gauges.tachometer.value(), 7200.0);
        assert_close(gauges.fuel_gauge.value(), 99.999);
    }

    #[test]
    fn test_gauges_render_in_order() {
        let mut dash = Dashboard::new();
        let (_, rec) = draw(&mut dash, &FakeSim::moving(1.0), Frame::sized(800, 600));
        let names: Vec<&str> = rec
            .texts()
            .into_iter()
            .filter(|t| ["SPEED", "TACH", "FUEL"].contains(t))
            .collect();
        assert_eq!(names, vec!["SPEED", "TACH", "FUEL"]);
    }

    #[test]
    fn test_fuel_runs_dry() {
        let mut dash = Dashboard::new();
        let sim = FakeSim::moving(1.0);
        let frame = Frame::sized(800, 600);
        for _ in 0..100_000 {
            dash.render::<_, Recorder>(&sim, &frame, None);
        }
        let fuel = &dash.gauges().unwrap().fuel_gauge;
        assert_close(fuel.value(), 0.0);
        assert_eq!(fuel.zone().color, RED);
        let segments = fuel.status_segments();
        assert_eq!(segments.len(), 1, "only the red zone should be active");
    }

    #[test]
    fn test_gauge_iter_order() {
        let mut dash = Dashboard::new();
        draw(&mut dash, &FakeSim::moving(1.0), Frame::sized(800, 600));
        let kinds: Vec<GaugeKind> = dash.gauges().unwrap().iter().map(Gauge::kind).collect();
        assert_eq!(kinds, vec![GaugeKind::Speedometer, GaugeKind::Tachometer, GaugeKind::FuelGauge]);
    }
}
