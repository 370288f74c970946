//! World overlay: goal marker, car marker and the floating speed label.

use cluster_common::colors::{Color, GREEN, WHITE};
use cluster_common::layout::Frame;
use cluster_common::surface::{Font, Rect, Surface};
use cluster_common::widgets::draw_needle;

use crate::camera::TopDownCamera;
use crate::car::KinematicCar;
use crate::task::{GoalTask, speed_label};

const GOAL_SIZE: f32 = 8.0;
const CAR_SIZE: f32 = 10.0;
const HEADING_LENGTH: f32 = 14.0;
const HEADING_WIDTH: f32 = 2.0;
const CAR_COLOR: Color = Color::rgb(0.3, 0.6, 1.0);

/// Draw the task scene under the cluster.
pub fn render_scene<S>(
    surface: &mut S,
    camera: &TopDownCamera,
    frame: &Frame,
    car: &KinematicCar,
    task: &GoalTask,
) where
    S: Surface + ?Sized,
{
    let goal = camera.project(task.goal(), frame);
    surface.fill_rect(Rect::centered_square(goal, GOAL_SIZE), GREEN);

    let [x, y] = car.position();
    let body = camera.project([x, y, 0.0], frame);
    surface.fill_rect(Rect::centered_square(body, CAR_SIZE), CAR_COLOR);
    let nose = body.polar(HEADING_LENGTH, car.heading() as f32);
    draw_needle(surface, body, nose, HEADING_WIDTH, CAR_COLOR);

    if let Some(label) = speed_label(car) {
        // Height has no screen effect top-down, lift by the marker size instead
        let at = camera.project(label.position, frame);
        surface.draw_text(Font::Normal, &label.text, at.x, at.y + CAR_SIZE, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use cluster_common::profiling::DrawStats;

    use super::*;
    use crate::config::CarConfig;

    #[test]
    fn test_scene_draws_markers_and_label() {
        let config = CarConfig {
            seed: Some(1),
            ..CarConfig::default()
        };
        let car = KinematicCar::new(&config);
        let task = GoalTask::new(&config);
        let mut stats = DrawStats::new();
        render_scene(&mut stats, &TopDownCamera::new(60.0), &Frame::sized(800, 600), &car, &task);
        assert_eq!(stats.texts(), 1);
        assert!(stats.rects() >= 3);
    }

    #[test]
    fn test_scene_is_deterministic() {
        let config = CarConfig {
            seed: Some(1),
            ..CarConfig::default()
        };
        let car = KinematicCar::new(&config);
        let task = GoalTask::new(&config);
        let camera = TopDownCamera::new(60.0);
        let frame = Frame::sized(800, 600);
        let mut a = DrawStats::new();
        let mut b = DrawStats::new();
        render_scene(&mut a, &camera, &frame, &car, &task);
        render_scene(&mut b, &camera, &frame, &car, &task);
        assert_eq!(a.digest(), b.digest());
    }
}
