use super::CameraState;
use nalgebra_glm as glm;
use winit::event::MouseButton;

const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 1000.0;

/// Turns pointer input into orbit, pan and zoom of a [`CameraState`]
pub struct CameraController {
    state: CameraState,
    left_mouse_pressed: bool,
    middle_mouse_pressed: bool,
    right_mouse_pressed: bool,
    alt_pressed: bool,
    shift_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl CameraController {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            left_mouse_pressed: false,
            middle_mouse_pressed: false,
            right_mouse_pressed: false,
            alt_pressed: false,
            shift_pressed: false,
            last_mouse_pos: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left_mouse_pressed = pressed,
            MouseButton::Middle => self.middle_mouse_pressed = pressed,
            MouseButton::Right => self.right_mouse_pressed = pressed,
            _ => return,
        }
        if !pressed {
            self.last_mouse_pos = None;
        }
    }

    pub fn on_modifiers(&mut self, shift: bool, alt: bool) {
        self.shift_pressed = shift;
        self.alt_pressed = alt;
    }

    /// Returns true when the move changed the camera
    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        let should_pan = self.middle_mouse_pressed || (self.shift_pressed && self.right_mouse_pressed);
        let should_rotate = self.right_mouse_pressed || (self.alt_pressed && self.left_mouse_pressed);

        if !should_pan && !should_rotate {
            self.last_mouse_pos = None;
            return false;
        }

        let handled = match self.last_mouse_pos {
            Some(last) => {
                let delta_x = (position.0 - last.0) as f32;
                let delta_y = (position.1 - last.1) as f32;
                if should_pan {
                    self.pan(delta_x, -delta_y);
                } else {
                    self.rotate(delta_x, delta_y);
                }
                true
            }
            None => false,
        };
        self.last_mouse_pos = Some(position);
        handled
    }

    pub fn on_scroll(&mut self, delta: f32) {
        let zoom_factor = 1.0 - delta * 0.1;
        self.state.distance = (self.state.distance * zoom_factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.state.yaw -= delta_x * 0.01;
        self.state.pitch -= delta_y * 0.01;
        self.state.pitch = self.state.pitch.clamp(-1.5, 1.5);
    }

    fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = glm::vec3(
            self.state.yaw.cos() * self.state.pitch.cos(),
            self.state.yaw.sin() * self.state.pitch.cos(),
            self.state.pitch.sin(),
        );
        let right = glm::normalize(&glm::cross(&forward, &glm::vec3(0.0, 0.0, 1.0)));
        let up = glm::cross(&right, &forward);

        let pan_speed = self.state.distance * 0.001;
        for (axis, target) in self.state.target.iter_mut().enumerate() {
            *target += (right[axis] * delta_x - up[axis] * delta_y) * pan_speed;
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_mouse_pos = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_drag_orbits() {
        let mut controller = CameraController::new(CameraState::default());
        let yaw = controller.state().yaw;
        controller.on_mouse_button(MouseButton::Right, true);
        assert!(!controller.on_mouse_move((10.0, 10.0)));
        assert!(controller.on_mouse_move((30.0, 10.0)));
        assert!((controller.state().yaw - (yaw - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut controller = CameraController::new(CameraState::default());
        for _ in 0..100 {
            controller.on_scroll(5.0);
        }
        assert_eq!(controller.state().distance, MIN_DISTANCE);
    }
}
