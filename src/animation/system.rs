// Pose evaluation for a skeleton

use super::skeleton::*;
use super::types::*;
use crate::model::{AnimationClip, Model};
use nalgebra_glm as glm;

/// Evaluates clips against the skeleton of one model
pub struct AnimationSystem {
    pub bones: Vec<BoneState>,
}

impl AnimationSystem {
    pub fn new() -> Self {
        Self { bones: Vec::new() }
    }

    /// Update pose to `time` seconds using the given clip bindings
    pub fn update(&mut self, tracks: &[TrackBinding], time: f32) {
        // Reset all "IsReady" flags
        for bone in &mut self.bones {
            bone.is_ready = false;
        }

        // 1. Interpolate all bones to the current time
        for (i, bone) in self.bones.iter_mut().enumerate() {
            let track = tracks.iter().find(|t| t.bone_index == i);
            interp_bone(bone, track, time);
        }

        // 2. Calculate absolute transformations (hierarchy)
        for i in 0..self.bones.len() {
            calc_bone(i, &mut self.bones);
        }
    }

    /// Reset all bones to the bind pose
    pub fn reset_to_base_pose(&mut self) {
        self.update(&[], 0.0);
    }

    /// Resolve a clip's bone ids against this skeleton
    pub fn bind_clip(&self, clip: &AnimationClip) -> Vec<TrackBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());
        for track in &clip.tracks {
            let Some(bone_index) = self.bones.iter().position(|b| b.object_id == track.bone_id) else {
                log::debug!(
                    "Clip '{}' animates unknown bone {}; track skipped",
                    clip.name,
                    track.bone_id
                );
                continue;
            };
            bindings.push(TrackBinding {
                bone_index,
                translation: track
                    .translation
                    .as_ref()
                    .map(|c| Controller::from_model(ControllerKind::Translation, c)),
                rotation: track
                    .rotation
                    .as_ref()
                    .map(|c| Controller::from_model(ControllerKind::Rotation, c)),
                scaling: track
                    .scaling
                    .as_ref()
                    .map(|c| Controller::from_model(ControllerKind::Scaling, c)),
            });
        }
        bindings
    }

    pub fn get_bones(&self) -> &[BoneState] {
        &self.bones
    }

    pub fn clear(&mut self) {
        self.bones.clear();
    }
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationSystem {
    /// Initialize the skeleton from model bones and evaluate the bind pose
    pub fn init_from_model(&mut self, model: &Model) {
        self.clear();

        for bone in &model.bones {
            let pivot = glm::vec3(bone.pivot_point[0], bone.pivot_point[1], bone.pivot_point[2]);
            self.bones.push(BoneState::new(bone.name.clone(), bone.object_id, pivot));
        }

        // parent_id is an object id, not an array index
        for (idx, bone) in model.bones.iter().enumerate() {
            self.bones[idx].parent = if bone.parent_id >= 0 {
                model.find_bone(bone.parent_id as u32)
            } else {
                None
            };
        }

        self.reset_to_base_pose();

        log::debug!(
            "Animation system initialized: {} bones for '{}'",
            self.bones.len(),
            model.name
        );
    }
}
