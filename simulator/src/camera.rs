//! Top-down camera and the anchor choice built on it.

use cluster_common::layout::{AnchorStrategy, Frame, ProjectedAnchor, Projector, ScreenCentered};
use cluster_common::surface::Vec2;
use cluster_common::telemetry::SimState;

use crate::config::{AnchorMode, DashboardConfig};

/// Orthographic camera looking straight down at the world origin.
///
/// World x maps to screen x, world y to screen y (both up). Height is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownCamera {
    pub pixels_per_meter: f32,
}

impl TopDownCamera {
    pub const fn new(pixels_per_meter: f32) -> Self { Self { pixels_per_meter } }

    /// Screen position of a world point, visible or not.
    pub fn project(
        &self,
        world: [f64; 3],
        frame: &Frame,
    ) -> Vec2 {
        let center = frame.center();
        Vec2::new(
            center.x + world[0] as f32 * self.pixels_per_meter,
            center.y + world[1] as f32 * self.pixels_per_meter,
        )
    }
}

impl Projector for TopDownCamera {
    /// `None` outside the frame.
    fn world_to_screen(
        &self,
        world: [f64; 3],
        frame: &Frame,
    ) -> Option<Vec2> {
        let p = self.project(world, frame);
        let left = frame.x as f32;
        let bottom = frame.y as f32;
        let inside = p.x >= left
            && p.x <= left + frame.width as f32
            && p.y >= bottom
            && p.y <= bottom + frame.height as f32;
        inside.then_some(p)
    }
}

/// Anchor selected by `[dashboard] anchor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneAnchor {
    Screen(ScreenCentered),
    Car(ProjectedAnchor<TopDownCamera>),
}

impl SceneAnchor {
    pub fn from_config(
        config: &DashboardConfig,
        camera: TopDownCamera,
    ) -> Self {
        match config.anchor {
            AnchorMode::Screen => Self::Screen(ScreenCentered),
            AnchorMode::Car => Self::Car(ProjectedAnchor::new(camera)),
        }
    }
}

impl AnchorStrategy for SceneAnchor {
    fn anchor<M>(
        &self,
        sim: &M,
        frame: &Frame,
    ) -> Vec2
    where
        M: SimState + ?Sized,
    {
        match self {
            Self::Screen(a) => a.anchor(sim, frame),
            Self::Car(a) => a.anchor(sim, frame),
        }
    }
}
