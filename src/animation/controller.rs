// Controller data handling

use super::types::*;
use crate::model::Interpolation;
use nalgebra_glm as glm;

/// Get interpolated data from a controller at `time` seconds.
/// Times before the first or after the last keyframe hold the edge value.
/// A non-finite time yields the first keyframe.
pub fn get_frame_data(controller: &Controller, time: f32) -> Vec<f32> {
    let items = &controller.items;
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return controller.identity();
    };

    if !time.is_finite() || time <= first.time {
        return first.data.clone();
    }
    if time >= last.time {
        return last.data.clone();
    }

    // Find surrounding keyframes
    let after_idx = items.partition_point(|item| item.time <= time);
    let before = &items[after_idx - 1];
    let after = &items[after_idx];

    let span = after.time - before.time;
    if span <= f32::EPSILON {
        return after.data.clone();
    }
    let t = (time - before.time) / span;

    match (controller.interpolation, controller.kind) {
        (Interpolation::DontInterp, _) => before.data.clone(),
        (Interpolation::Linear, ControllerKind::Rotation) => slerp_data(before, after, t),
        (Interpolation::Linear, _) => before
            .data
            .iter()
            .zip(after.data.iter())
            .map(|(b, a)| b + (a - b) * t)
            .collect(),
        (Interpolation::Hermite | Interpolation::Bezier, kind) => {
            let t2 = t * t;
            let t3 = t2 * t;
            let h1 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h2 = -2.0 * t3 + 3.0 * t2;
            let h3 = t3 - 2.0 * t2 + t;
            let h4 = t3 - t2;

            let mut data: Vec<f32> = before
                .data
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let a = after.data.get(i).copied().unwrap_or(0.0);
                    let out_t = before.out_tan.get(i).copied().unwrap_or(0.0);
                    let in_t = after.in_tan.get(i).copied().unwrap_or(0.0);
                    h1 * b + h2 * a + h3 * out_t + h4 * in_t
                })
                .collect();

            if kind == ControllerKind::Rotation && data.len() >= 4 {
                let q = glm::quat_normalize(&glm::quat(data[0], data[1], data[2], data[3]));
                data = vec![q.i, q.j, q.k, q.w];
            }
            data
        }
    }
}

fn slerp_data(before: &ControllerItem, after: &ControllerItem, t: f32) -> Vec<f32> {
    if before.data.len() < 4 || after.data.len() < 4 {
        return before.data.clone();
    }
    let q1 = glm::quat(before.data[0], before.data[1], before.data[2], before.data[3]);
    let q2 = glm::quat(after.data[0], after.data[1], after.data[2], after.data[3]);
    let result = glm::quat_slerp(&q1, &q2, t);
    vec![result.i, result.j, result.k, result.w]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnimationController, Keyframe};

    fn linear(kind: ControllerKind, keys: &[(f32, &[f32])]) -> Controller {
        let source = AnimationController::linear(
            keys.iter().map(|(t, d)| Keyframe::new(*t, d)).collect(),
        );
        Controller::from_model(kind, &source)
    }

    #[test]
    fn empty_controller_yields_identity() {
        let c = linear(ControllerKind::Scaling, &[]);
        assert_eq!(get_frame_data(&c, 1.0), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn holds_edge_values_outside_key_range() {
        let c = linear(ControllerKind::Translation, &[(0.5, &[1.0, 0.0, 0.0]), (1.5, &[3.0, 0.0, 0.0])]);
        assert_eq!(get_frame_data(&c, 0.0)[0], 1.0);
        assert_eq!(get_frame_data(&c, 9.0)[0], 3.0);
    }

    #[test]
    fn linear_translation_midpoint() {
        let c = linear(ControllerKind::Translation, &[(0.0, &[0.0, 0.0, 0.0]), (2.0, &[4.0, -2.0, 0.0])]);
        let data = get_frame_data(&c, 1.0);
        assert!((data[0] - 2.0).abs() < 1e-6);
        assert!((data[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_slerp_stays_normalized() {
        let half = std::f32::consts::FRAC_PI_4;
        let c = linear(
            ControllerKind::Rotation,
            &[(0.0, &[0.0, 0.0, 0.0, 1.0]), (1.0, &[half.sin(), 0.0, 0.0, half.cos()])],
        );
        let q = get_frame_data(&c, 0.5);
        let len = q.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((len - 1.0).abs() < 1e-5);
        // halfway to 90 degrees about X is 45 degrees
        let expected = (std::f32::consts::FRAC_PI_8).sin();
        assert!((q[0] - expected).abs() < 1e-5);
    }

    #[test]
    fn non_finite_time_yields_first_key() {
        let c = linear(ControllerKind::Translation, &[(0.5, &[1.0, 0.0, 0.0]), (1.5, &[3.0, 0.0, 0.0])]);
        assert_eq!(get_frame_data(&c, f32::NAN)[0], 1.0);
        assert_eq!(get_frame_data(&c, f32::INFINITY)[0], 1.0);
    }

    #[test]
    fn keyframes_are_sorted_on_load() {
        let c = linear(ControllerKind::Translation, &[(1.0, &[1.0, 0.0, 0.0]), (0.0, &[0.0, 0.0, 0.0])]);
        assert_eq!(c.items[0].time, 0.0);
        assert!((get_frame_data(&c, 0.25)[0] - 0.25).abs() < 1e-6);
    }
}
