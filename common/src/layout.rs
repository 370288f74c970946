//! Cluster placement inside the frame rectangle.
//!
//! The layout is recomputed from scratch every frame: pick an anchor point,
//! lift it by [`DASHBOARD_LIFT`], put the speedometer there and the two small
//! gauges on either side. Nothing is smoothed between frames.
//!
//! The anchor is chosen by an [`AnchorStrategy`]. [`ScreenCentered`] uses the
//! frame center. [`ProjectedAnchor`] follows a point in the simulated world
//! through a caller-supplied [`Projector`].

use tracing::trace;

use crate::config::{CAR_BODY, DASHBOARD_LIFT, DASHBOARD_MARKER_SITE, SIDE_GAUGE_OFFSET};
use crate::surface::Vec2;
use crate::telemetry::SimState;

/// Viewport rectangle for the current frame, in host pixels (y up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const fn new(
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    ) -> Self {
        Self { x, y, width, height }
    }

    /// Frame at the origin.
    pub const fn sized(
        width: u32,
        height: u32,
    ) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

// =============================================================================
// Anchor Strategies
// =============================================================================

/// World-to-screen projection supplied by the host camera.
pub trait Projector {
    /// Screen position of a world point, or `None` when it is not visible.
    fn world_to_screen(
        &self,
        world: [f64; 3],
        frame: &Frame,
    ) -> Option<Vec2>;
}

/// Picks the point the cluster is laid out around.
pub trait AnchorStrategy {
    fn anchor<M>(
        &self,
        sim: &M,
        frame: &Frame,
    ) -> Vec2
    where
        M: SimState + ?Sized;
}

/// Anchor at the frame center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenCentered;

impl AnchorStrategy for ScreenCentered {
    fn anchor<M>(
        &self,
        _sim: &M,
        frame: &Frame,
    ) -> Vec2
    where
        M: SimState + ?Sized,
    {
        frame.center()
    }
}

/// Anchor at the projected dashboard marker.
///
/// Looks up the `dashboard_marker` site, then the `car` body. When neither
/// exists or the projection fails, falls back to the frame center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectedAnchor<P> {
    projector: P,
}

impl<P: Projector> ProjectedAnchor<P> {
    pub const fn new(projector: P) -> Self { Self { projector } }

    pub const fn projector(&self) -> &P { &self.projector }

    pub fn projector_mut(&mut self) -> &mut P { &mut self.projector }
}

impl<P: Projector> AnchorStrategy for ProjectedAnchor<P> {
    fn anchor<M>(
        &self,
        sim: &M,
        frame: &Frame,
    ) -> Vec2
    where
        M: SimState + ?Sized,
    {
        let world = sim.site_position(DASHBOARD_MARKER_SITE).or_else(|| sim.body_position(CAR_BODY));
        let projected = world
            .and_then(|w| self.projector.world_to_screen(w, frame))
            .filter(|p| p.x.is_finite() && p.y.is_finite());

        projected.unwrap_or_else(|| {
            trace!("no projectable anchor, using frame center");
            frame.center()
        })
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Gauge centers for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterLayout {
    pub speedometer: Vec2,
    pub tachometer: Vec2,
    pub fuel_gauge: Vec2,
}

impl ClusterLayout {
    /// Lay the cluster out around `anchor`.
    pub fn around(anchor: Vec2) -> Self {
        let y = anchor.y - DASHBOARD_LIFT;
        Self {
            speedometer: Vec2::new(anchor.x, y),
            tachometer: Vec2::new(anchor.x - SIDE_GAUGE_OFFSET, y),
            fuel_gauge: Vec2::new(anchor.x + SIDE_GAUGE_OFFSET, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSim, assert_close};

    /// Drops z and shifts by the frame origin.
    struct Flatten;

    impl Projector for Flatten {
        fn world_to_screen(
            &self,
            world: [f64; 3],
            frame: &Frame,
        ) -> Option<Vec2> {
            Some(Vec2::new(frame.x as f32 + world[0] as f32, frame.y as f32 + world[1] as f32))
        }
    }

    /// Nothing is ever on screen.
    struct Blind;

    impl Projector for Blind {
        fn world_to_screen(
            &self,
            _world: [f64; 3],
            _frame: &Frame,
        ) -> Option<Vec2> {
            None
        }
    }

    #[test]
    fn test_layout_800x600() {
        let frame = Frame::sized(800, 600);
        let layout = ClusterLayout::around(ScreenCentered.anchor(&FakeSim::default(), &frame));
        assert_eq!(layout.speedometer, Vec2::new(400.0, 200.0));
        assert_eq!(layout.tachometer, Vec2::new(150.0, 200.0));
        assert_eq!(layout.fuel_gauge, Vec2::new(650.0, 200.0));
    }

    #[test]
    fn test_layout_respects_frame_origin() {
        let frame = Frame::new(100, 50, 800, 600);
        let layout = ClusterLayout::around(frame.center());
        assert_eq!(layout.speedometer, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_side_gauges_clear_speedometer() {
        let layout = ClusterLayout::around(Vec2::new(0.0, 0.0));
        let gap = layout.speedometer.distance(layout.fuel_gauge) - 150.0 - 80.0;
        assert_close(gap, 20.0);
    }

    #[test]
    fn test_projected_anchor_prefers_marker_site() {
        let sim = FakeSim {
            sites: vec![("dashboard_marker", [10.0, 20.0, 0.5])],
            bodies: vec![("car", [1.0, 2.0, 0.0])],
            ..FakeSim::default()
        };
        let anchor = ProjectedAnchor::new(Flatten).anchor(&sim, &Frame::sized(800, 600));
        assert_eq!(anchor, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_projected_anchor_falls_back_to_car_body() {
        let sim = FakeSim {
            bodies: vec![("car", [1.0, 2.0, 0.0])],
            ..FakeSim::default()
        };
        let anchor = ProjectedAnchor::new(Flatten).anchor(&sim, &Frame::new(5, 5, 10, 10));
        assert_eq!(anchor, Vec2::new(6.0, 7.0));
    }

    #[test]
    fn test_projected_anchor_falls_back_to_center() {
        let frame = Frame::sized(800, 600);
        let empty = FakeSim::default();
        assert_eq!(ProjectedAnchor::new(Flatten).anchor(&empty, &frame), frame.center());

        let sim = FakeSim {
            bodies: vec![("car", [1.0, 2.0, 0.0])],
            ..FakeSim::default()
        };
        assert_eq!(
            ProjectedAnchor::new(Blind).anchor(&sim, &frame),
            frame.center(),
            "failed projection should fall back"
        );
    }
}
