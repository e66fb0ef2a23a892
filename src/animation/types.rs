// Runtime animation data types

use crate::model::{AnimationController, Interpolation};
use nalgebra_glm as glm;

/// Controller item - single keyframe data
#[derive(Debug, Clone)]
pub struct ControllerItem {
    pub time: f32,         // Seconds into the clip
    pub data: Vec<f32>,    // Data (translation, rotation, scaling)
    pub in_tan: Vec<f32>,  // In tangent (for Hermite/Bezier interpolation)
    pub out_tan: Vec<f32>, // Out tangent
}

/// Which bone channel a controller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Translation,
    Rotation,
    Scaling,
}

/// Animation controller ready for sampling
#[derive(Debug, Clone)]
pub struct Controller {
    pub kind: ControllerKind,
    pub interpolation: Interpolation,
    pub items: Vec<ControllerItem>, // Keyframes, sorted by time
}

impl Controller {
    pub fn from_model(kind: ControllerKind, source: &AnimationController) -> Self {
        let mut items: Vec<ControllerItem> = source
            .keyframes
            .iter()
            .map(|kf| ControllerItem {
                time: kf.time,
                data: kf.data.clone(),
                in_tan: kf.in_tan.clone(),
                out_tan: kf.out_tan.clone(),
            })
            .collect();
        items.sort_by(|a, b| a.time.total_cmp(&b.time));

        Self {
            kind,
            interpolation: source.interpolation,
            items,
        }
    }

    /// Value used when the controller has no keyframes
    pub fn identity(&self) -> Vec<f32> {
        match self.kind {
            ControllerKind::Translation => vec![0.0, 0.0, 0.0],
            ControllerKind::Rotation => vec![0.0, 0.0, 0.0, 1.0],
            ControllerKind::Scaling => vec![1.0, 1.0, 1.0],
        }
    }
}

/// Controllers of one bone for one clip
#[derive(Debug, Clone)]
pub struct TrackBinding {
    pub bone_index: usize,
    pub translation: Option<Controller>,
    pub rotation: Option<Controller>,
    pub scaling: Option<Controller>,
}

/// Bone transformation state
#[derive(Debug, Clone)]
pub struct BoneState {
    pub name: String,
    pub object_id: u32,
    pub parent: Option<usize>, // Parent bone index
    pub pivot: glm::Vec3,

    // Current animated values (computed)
    pub is_ready: bool,            // True if already calculated this frame
    pub abs_quaternion: glm::Quat, // Absolute rotation quaternion
    pub abs_matrix: glm::Mat3,     // Absolute rotation matrix (with scaling)
    pub abs_vector: glm::Vec3,     // Absolute position of the pivot
    pub abs_scaling: glm::Vec3,    // Absolute scaling
}

impl Default for BoneState {
    fn default() -> Self {
        Self {
            name: String::new(),
            object_id: 0,
            parent: None,
            pivot: glm::vec3(0.0, 0.0, 0.0),
            is_ready: false,
            abs_quaternion: glm::quat_identity(),
            abs_matrix: glm::identity(),
            abs_vector: glm::vec3(0.0, 0.0, 0.0),
            abs_scaling: glm::vec3(1.0, 1.0, 1.0),
        }
    }
}

impl BoneState {
    pub fn new(name: String, object_id: u32, pivot: glm::Vec3) -> Self {
        Self {
            name,
            object_id,
            pivot,
            abs_vector: pivot,
            ..Default::default()
        }
    }
}
