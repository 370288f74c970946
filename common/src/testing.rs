//! Test-only recording surface, fake simulation state and float helpers.

use crate::colors::Color;
use crate::surface::{ArcStroke, Font, Rect, Surface, Vec2};
use crate::telemetry::SimState;
use crate::widgets::{tile_arc, tile_disc, tile_segment};

/// One recorded call on a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect(Rect, Color),
    Text {
        font: Font,
        text: String,
        x: f32,
        y: f32,
        color: Color,
    },
    Arc(ArcStroke, Color),
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// Surface that records every call.
///
/// By default the stroke/fill hooks are recorded as single commands, like a
/// host with real curve primitives. [`Recorder::tiled`] runs the rectangle
/// fallbacks instead, like a two-primitive host.
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    tiled: bool,
}

impl Recorder {
    pub fn new() -> Self { Self::default() }

    pub fn tiled() -> Self {
        Self {
            commands: Vec::new(),
            tiled: true,
        }
    }

    pub fn rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect(r, color) => Some((*r, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn arcs(&self) -> Vec<(ArcStroke, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc(a, color) => Some((*a, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Segment { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn fill_rect(
        &mut self,
        rect: Rect,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn draw_text(
        &mut self,
        font: Font,
        text: &str,
        x: f32,
        y: f32,
        color: Color,
    ) {
        self.commands.push(DrawCommand::Text {
            font,
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn stroke_arc(
        &mut self,
        arc: ArcStroke,
        color: Color,
    ) {
        if self.tiled {
            tile_arc(self, arc, color);
        } else {
            self.commands.push(DrawCommand::Arc(arc, color));
        }
    }

    fn fill_disc(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
    ) {
        if self.tiled {
            tile_disc(self, center, radius, color);
        } else {
            self.commands.push(DrawCommand::Disc { center, radius, color });
        }
    }

    fn stroke_segment(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    ) {
        if self.tiled {
            tile_segment(self, from, to, width, color);
        } else {
            self.commands.push(DrawCommand::Segment { from, to, width, color });
        }
    }
}

/// Minimal in-memory simulation state.
#[derive(Debug, Default, Clone)]
pub struct FakeSim {
    pub qvel: Vec<f64>,
    pub sensors: Vec<(&'static str, [f64; 3])>,
    pub sites: Vec<(&'static str, [f64; 3])>,
    pub bodies: Vec<(&'static str, [f64; 3])>,
}

impl FakeSim {
    pub fn moving(vx: f64) -> Self {
        Self {
            qvel: vec![vx, 0.0, 0.0],
            ..Self::default()
        }
    }
}

fn lookup(
    table: &[(&'static str, [f64; 3])],
    name: &str,
) -> Option<[f64; 3]> {
    table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

impl SimState for FakeSim {
    fn qvel(&self) -> &[f64] { &self.qvel }

    fn sensor(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        lookup(&self.sensors, name)
    }

    fn site_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        lookup(&self.sites, name)
    }

    fn body_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        lookup(&self.bodies, name)
    }
}

#[track_caller]
pub fn assert_close(
    actual: f32,
    expected: f32,
) {
    assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}
