//! Drive-to-goal task.
//!
//! The car chases a goal marker on the ground. Once it gets within the goal
//! tolerance the goal jumps to a new uniform random spot in
//! `[-goal_bound, goal_bound]²`. The residual is what a planner would
//! minimize: position error plus control effort.

use cluster_common::config::{CAR_BODY, CAR_VELOCITY_SENSOR};
use cluster_common::telemetry::SimState;
use cluster_common::thresholds::MS_TO_KMH;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::car::{Controls, KinematicCar, wrap_angle};
use crate::config::CarConfig;

/// Goal marker height (m).
pub const GOAL_HEIGHT: f64 = 0.01;

/// Speed label height above the car body (m).
pub const LABEL_LIFT: f64 = 0.2;

/// Throttle per meter of remaining distance, saturating at 1.
const APPROACH_GAIN: f64 = 0.5;

/// Turn control per radian of heading error, saturating at 1.
const STEER_GAIN: f64 = 2.0;

pub struct GoalTask {
    goal: [f64; 3],
    tolerance: f64,
    bound: f64,
    respawns: u32,
    rng: StdRng,
}

impl GoalTask {
    pub fn new(config: &CarConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut task = Self {
            goal: [0.0, 0.0, GOAL_HEIGHT],
            tolerance: config.goal_tolerance,
            bound: config.goal_bound,
            respawns: 0,
            rng,
        };
        task.respawn();
        task
    }

    #[inline]
    pub const fn goal(&self) -> [f64; 3] { self.goal }

    /// Goals reached so far.
    #[inline]
    pub const fn respawns(&self) -> u32 { self.respawns }

    /// Planar distance from the car to the goal.
    pub fn distance(
        &self,
        car: &KinematicCar,
    ) -> f64 {
        let [x, y] = car.position();
        (self.goal[0] - x).hypot(self.goal[1] - y)
    }

    /// `[x error, y error, forward control, turn control]`
    pub fn residual(
        &self,
        car: &KinematicCar,
    ) -> [f64; 4] {
        let [x, y] = car.position();
        let ctrl = car.controls();
        [x - self.goal[0], y - self.goal[1], ctrl.forward, ctrl.turn]
    }

    /// Move the goal if the car reached it. Returns true on respawn.
    pub fn transition(
        &mut self,
        car: &KinematicCar,
    ) -> bool {
        if self.distance(car) >= self.tolerance {
            return false;
        }
        self.respawn();
        self.respawns += 1;
        info!(
            goal_x = self.goal[0],
            goal_y = self.goal[1],
            reached = self.respawns,
            "goal reached, respawned"
        );
        true
    }

    /// Steering policy: turn toward the goal, slow down when pointing away from
    /// it or close to it. Pointing more than 90° away turns in place.
    pub fn policy(
        &self,
        car: &KinematicCar,
    ) -> Controls {
        let [x, y] = car.position();
        let bearing = (self.goal[1] - y).atan2(self.goal[0] - x);
        let error = wrap_angle(bearing - car.heading());
        Controls {
            forward: (self.distance(car) * APPROACH_GAIN).min(1.0) * error.cos().max(0.0),
            turn: (error * STEER_GAIN).clamp(-1.0, 1.0),
        }
    }

    /// One simulation step: policy, car dynamics, goal transition.
    pub fn step(
        &mut self,
        car: &mut KinematicCar,
        dt: f64,
    ) {
        car.step(self.policy(car), dt);
        self.transition(car);
    }

    fn respawn(&mut self) {
        self.goal = [
            self.rng.gen_range(-self.bound..self.bound),
            self.rng.gen_range(-self.bound..self.bound),
            GOAL_HEIGHT,
        ];
    }
}

/// Floating speed label for the car.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedLabel {
    pub text: String,
    /// World position, above the car body.
    pub position: [f64; 3],
}

/// Speed label from the car body and velocity sensor, if both exist.
pub fn speed_label<M>(sim: &M) -> Option<SpeedLabel>
where
    M: SimState + ?Sized,
{
    let body = sim.body_position(CAR_BODY)?;
    let [vx, vy, vz] = sim.sensor(CAR_VELOCITY_SENSOR)?;
    let speed_ms = (vx * vx + vy * vy + vz * vz).sqrt();
    let speed_kmh = speed_ms * f64::from(MS_TO_KMH);
    Some(SpeedLabel {
        text: format!("Speed: {speed_ms:.2} m/s ({speed_kmh:.1} km/h)"),
        position: [body[0], body[1], body[2] + LABEL_LIFT],
    })
}
