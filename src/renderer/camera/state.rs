use nalgebra_glm as glm;

/// Orbit camera around a target, Z-up
#[derive(Debug, Clone)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: [f32; 3],
    pub default_yaw: f32,
    pub default_pitch: f32,
    pub default_distance: f32,
    pub default_target: [f32; 3],
}

impl CameraState {
    pub fn new(yaw: f32, pitch: f32, distance: f32, target: [f32; 3]) -> Self {
        Self {
            yaw,
            pitch,
            distance,
            target,
            default_yaw: yaw,
            default_pitch: pitch,
            default_distance: distance,
            default_target: target,
        }
    }

    /// Aim at a new model and make that the reset position
    pub fn focus(&mut self, target: [f32; 3], distance: f32) {
        self.default_target = target;
        self.default_distance = distance;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.yaw = self.default_yaw;
        self.pitch = self.default_pitch;
        self.distance = self.default_distance;
        self.target = self.default_target;
    }

    pub fn eye(&self) -> glm::Vec3 {
        glm::vec3(
            self.target[0] + self.distance * self.yaw.cos() * self.pitch.cos(),
            self.target[1] + self.distance * self.yaw.sin() * self.pitch.cos(),
            self.target[2] + self.distance * self.pitch.sin(),
        )
    }

    pub fn view_proj(&self, aspect: f32, far_plane: f32) -> glm::Mat4 {
        let proj = glm::perspective(aspect, 45.0_f32.to_radians(), 0.1, far_plane);
        let center = glm::vec3(self.target[0], self.target[1], self.target[2]);
        let up = glm::vec3(0.0, 0.0, 1.0);
        proj * glm::look_at(&self.eye(), &center, &up)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(
            std::f32::consts::FRAC_PI_2, // looking along -Y
            std::f32::consts::PI * 0.1,
            120.0,
            [0.0, 0.0, 0.0],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_center() {
        let camera = CameraState::new(0.4, 0.3, 50.0, [1.0, 2.0, 3.0]);
        let clip = camera.view_proj(1.5, 1000.0) * glm::vec4(1.0, 2.0, 3.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-4);
        assert!((clip.y / clip.w).abs() < 1e-4);
    }

    #[test]
    fn focus_becomes_reset_position() {
        let mut camera = CameraState::default();
        camera.focus([0.0, 0.0, 20.0], 80.0);
        camera.yaw += 1.0;
        camera.distance = 10.0;
        camera.reset();
        assert_eq!(camera.target, [0.0, 0.0, 20.0]);
        assert_eq!(camera.distance, 80.0);
    }
}
