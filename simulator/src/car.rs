//! Kinematic stand-in for the physics engine.
//!
//! A point car on the ground plane with a heading, driven by two controls:
//! forward throttle and turn, both in `[-1, 1]`. It exposes the same state a
//! physics model of the goal task would: generalized velocities, a
//! `car_velocity` sensor, the `car` body and a `dashboard_marker` site.

use cluster_common::config::{CAR_BODY, CAR_VELOCITY_SENSOR, DASHBOARD_MARKER_SITE};
use cluster_common::telemetry::SimState;

use crate::config::CarConfig;

/// Marker site height above the car body (m).
const MARKER_HEIGHT: f64 = 0.3;

/// Body origin height above the ground (m).
const BODY_HEIGHT: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub forward: f64,
    pub turn: f64,
}

impl Controls {
    pub const IDLE: Self = Self { forward: 0.0, turn: 0.0 };

    fn clamped(self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            turn: self.turn.clamp(-1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KinematicCar {
    /// `[x, y, yaw]`
    qpos: [f64; 3],
    /// `[vx, vy, vz]`
    qvel: [f64; 3],
    speed: f64,
    ctrl: Controls,
    max_speed: f64,
    accel: f64,
    turn_rate: f64,
}

impl KinematicCar {
    pub fn new(config: &CarConfig) -> Self {
        Self {
            qpos: [0.0; 3],
            qvel: [0.0; 3],
            speed: 0.0,
            ctrl: Controls::IDLE,
            max_speed: config.max_speed,
            accel: config.accel,
            turn_rate: config.turn_rate,
        }
    }

    #[inline]
    pub const fn position(&self) -> [f64; 2] { [self.qpos[0], self.qpos[1]] }

    #[inline]
    pub const fn heading(&self) -> f64 { self.qpos[2] }

    /// Signed speed along the heading (m/s).
    #[inline]
    pub const fn speed(&self) -> f64 { self.speed }

    #[inline]
    pub const fn controls(&self) -> Controls { self.ctrl }

    /// Advance by `dt` seconds under `ctrl`.
    pub fn step(
        &mut self,
        ctrl: Controls,
        dt: f64,
    ) {
        let ctrl = ctrl.clamped();
        self.ctrl = ctrl;

        let target = ctrl.forward * self.max_speed;
        let max_change = self.accel * dt;
        self.speed += (target - self.speed).clamp(-max_change, max_change);

        // Differential drive, turns in place
        self.qpos[2] = wrap_angle(self.qpos[2] + ctrl.turn * self.turn_rate * dt);

        let (sin, cos) = self.qpos[2].sin_cos();
        self.qvel = [self.speed * cos, self.speed * sin, 0.0];
        self.qpos[0] += self.qvel[0] * dt;
        self.qpos[1] += self.qvel[1] * dt;
    }
}

/// Wrap into `(-π, π]`.
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

impl SimState for KinematicCar {
    fn qvel(&self) -> &[f64] { &self.qvel }

    fn sensor(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        (name == CAR_VELOCITY_SENSOR).then_some(self.qvel)
    }

    fn site_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        (name == DASHBOARD_MARKER_SITE).then(|| [self.qpos[0], self.qpos[1], BODY_HEIGHT + MARKER_HEIGHT])
    }

    fn body_position(
        &self,
        name: &str,
    ) -> Option<[f64; 3]> {
        (name == CAR_BODY).then(|| [self.qpos[0], self.qpos[1], BODY_HEIGHT])
    }
}
