// Skeleton bone calculations

use super::controller::*;
use super::interpolation::*;
use super::types::*;
use nalgebra_glm as glm;

/// Interpolate the local state of a bone at `time`
pub fn interp_bone(bone: &mut BoneState, track: Option<&TrackBinding>, time: f32) {
    // Bone is ready if it has no parent
    bone.is_ready = bone.parent.is_none();

    // Translation
    bone.abs_vector = match track.and_then(|t| t.translation.as_ref()) {
        Some(controller) => {
            let data = get_frame_data(controller, time);
            bone.pivot + glm::vec3(component(&data, 0), component(&data, 1), component(&data, 2))
        }
        // No translation animation - use pivot point
        None => bone.pivot,
    };

    // Rotation
    bone.abs_quaternion = match track.and_then(|t| t.rotation.as_ref()) {
        Some(controller) => {
            let data = get_frame_data(controller, time);
            if data.len() >= 4 {
                glm::quat(data[0], data[1], data[2], data[3])
            } else {
                glm::quat_identity()
            }
        }
        None => glm::quat_identity(),
    };

    // Scaling
    bone.abs_scaling = match track.and_then(|t| t.scaling.as_ref()) {
        Some(controller) => {
            let data = get_frame_data(controller, time);
            glm::vec3(
                data.first().copied().unwrap_or(1.0),
                data.get(1).copied().unwrap_or(1.0),
                data.get(2).copied().unwrap_or(1.0),
            )
        }
        None => glm::vec3(1.0, 1.0, 1.0),
    };

    bone.abs_matrix = quaternion_to_matrix(&bone.abs_quaternion);
    bone.abs_matrix = apply_scaling_to_matrix(&bone.abs_matrix, &bone.abs_scaling);
}

fn component(data: &[f32], i: usize) -> f32 {
    data.get(i).copied().unwrap_or(0.0)
}

/// Calculate absolute transformation from parent
pub fn calc_absolute(parent: &BoneState, child: &mut BoneState) {
    // 1. Multiply rotation matrices
    child.abs_matrix = mul_matrices(&parent.abs_matrix, &child.abs_matrix);

    // 2. Transform child position by parent around the parent's rest pivot
    let local_pos = child.abs_vector - parent.pivot;
    let transformed = parent.abs_matrix * local_pos;
    child.abs_vector = parent.abs_vector + transformed;

    child.abs_scaling = child.abs_scaling.component_mul(&parent.abs_scaling);
}

/// Recursively calculate bone transformation hierarchy, parents first
pub fn calc_bone(bone_idx: usize, bones: &mut [BoneState]) {
    let Some(bone) = bones.get(bone_idx) else {
        return;
    };
    if bone.is_ready {
        return;
    }

    let Some(parent_idx) = bone.parent.filter(|&p| p < bones.len() && p != bone_idx) else {
        bones[bone_idx].is_ready = true;
        return;
    };

    // Mark before recursing so a malformed cycle terminates
    bones[bone_idx].is_ready = true;
    calc_bone(parent_idx, bones);

    let parent = bones[parent_idx].clone();
    calc_absolute(&parent, &mut bones[bone_idx]);
}
