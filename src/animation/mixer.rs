// Skeletal player bound to one model

use super::interpolation::rigid_skin_matrix;
use super::player::*;
use super::system::AnimationSystem;
use super::types::*;
use crate::model::{AnimationClip, Model, StructureKind};
use nalgebra_glm as glm;
use std::sync::Arc;

/// Live association between a clip and the mixer
#[derive(Debug, Clone)]
pub struct ClipAction {
    pub clip_name: String,
    pub duration: f32,
    tracks: Vec<TrackBinding>,
    pub time: f32,
    pub config: ActionConfig,
    pub enabled: bool,
    pub paused: bool,
    pub running: bool,
}

impl ClipAction {
    fn advance(&mut self, delta: f32) {
        let mut time = self.time + delta * self.config.time_scale;
        if !time.is_finite() {
            return;
        }
        let duration = self.duration.max(0.0);
        match self.config.loop_mode {
            LoopMode::Repeat => {
                time = if duration > 0.0 {
                    time.rem_euclid(duration)
                } else {
                    0.0
                };
            }
            LoopMode::Once => time = time.clamp(0.0, duration),
        }
        self.time = time;
    }

    fn sample_time(&self) -> f32 {
        self.time.clamp(0.0, self.duration.max(0.0))
    }
}

/// Mesh of the model with its cached world matrix
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub name: String,
    pub kind: StructureKind,
    pub bone_index: Option<usize>,
    pub world_matrix: glm::Mat4,
    pub needs_update: bool,
    rest_anchor: glm::Vec3,
}

impl MeshInstance {
    /// World position of the point the mesh is attached at
    pub fn anchor(&self) -> glm::Vec3 {
        let p = self.world_matrix * glm::vec4(self.rest_anchor.x, self.rest_anchor.y, self.rest_anchor.z, 1.0);
        glm::vec3(p.x, p.y, p.z)
    }
}

pub struct Mixer {
    model: Option<Arc<Model>>,
    system: AnimationSystem,
    actions: Vec<ClipAction>,
    meshes: Vec<MeshInstance>,
}

impl Mixer {
    pub fn new(model: Arc<Model>) -> Self {
        let mut system = AnimationSystem::new();
        system.init_from_model(&model);

        let meshes = model
            .meshes
            .iter()
            .map(|mesh| {
                let bone_index = mesh.bone_id.and_then(|id| model.find_bone(id));
                let rest_anchor = bone_index
                    .map(|i| system.bones[i].pivot)
                    .unwrap_or_else(|| glm::vec3(0.0, 0.0, 0.0));
                MeshInstance {
                    name: mesh.name.clone(),
                    kind: mesh.kind,
                    bone_index,
                    world_matrix: glm::identity(),
                    needs_update: true,
                    rest_anchor,
                }
            })
            .collect();

        let mut mixer = Self {
            model: Some(model),
            system,
            actions: Vec::new(),
            meshes,
        };
        mixer.refresh_world_matrices();
        mixer
    }

    pub fn model(&self) -> Option<&Arc<Model>> {
        self.model.as_ref()
    }

    pub fn bones(&self) -> &[BoneState] {
        self.system.get_bones()
    }

    pub fn meshes(&self) -> &[MeshInstance] {
        &self.meshes
    }

    pub fn action(&self, handle: ActionHandle) -> Option<&ClipAction> {
        self.actions.get(handle.0)
    }

    pub fn running_action_count(&self) -> usize {
        self.actions.iter().filter(|a| a.running).count()
    }

    /// Recompute world matrices flagged dirty. Returns how many were refreshed.
    pub fn refresh_world_matrices(&mut self) -> usize {
        let bones = self.system.get_bones();
        let mut refreshed = 0;
        for mesh in self.meshes.iter_mut().filter(|m| m.needs_update) {
            mesh.world_matrix = match mesh.bone_index.and_then(|i| bones.get(i)) {
                Some(bone) => rigid_skin_matrix(&bone.abs_matrix, &bone.abs_vector, &bone.pivot),
                None => glm::identity(),
            };
            mesh.needs_update = false;
            refreshed += 1;
        }
        refreshed
    }

    fn evaluate_pose(&mut self) {
        let current = self
            .actions
            .iter()
            .rev()
            .find(|a| a.running && a.enabled && a.config.weight > 0.0);
        match current {
            Some(action) => self.system.update(&action.tracks, action.sample_time()),
            None => self.system.reset_to_base_pose(),
        }
        self.mark_world_matrices_dirty();
    }

    fn action_mut(&mut self, handle: ActionHandle) -> Option<&mut ClipAction> {
        self.actions.get_mut(handle.0)
    }
}

impl SkeletalPlayer for Mixer {
    fn clip_action(&mut self, clip: &AnimationClip) -> ActionHandle {
        if let Some(idx) = self.actions.iter().position(|a| a.clip_name == clip.name) {
            return ActionHandle(idx);
        }
        self.actions.push(ClipAction {
            clip_name: clip.name.clone(),
            duration: clip.duration,
            tracks: self.system.bind_clip(clip),
            time: 0.0,
            config: ActionConfig::default(),
            enabled: true,
            paused: false,
            running: false,
        });
        ActionHandle(self.actions.len() - 1)
    }

    fn configure(&mut self, action: ActionHandle, config: ActionConfig) {
        if let Some(a) = self.action_mut(action) {
            a.config = config;
        }
    }

    fn reset(&mut self, action: ActionHandle) {
        if let Some(a) = self.action_mut(action) {
            a.time = 0.0;
            a.enabled = true;
            a.paused = false;
        }
    }

    fn play(&mut self, action: ActionHandle) {
        if let Some(a) = self.action_mut(action) {
            a.running = true;
        }
    }

    fn stop(&mut self, action: ActionHandle) {
        if let Some(a) = self.action_mut(action) {
            a.running = false;
            a.time = 0.0;
        }
    }

    fn set_enabled(&mut self, action: ActionHandle, enabled: bool) {
        if let Some(a) = self.action_mut(action) {
            a.enabled = enabled;
        }
    }

    fn set_paused(&mut self, action: ActionHandle, paused: bool) {
        if let Some(a) = self.action_mut(action) {
            a.paused = paused;
        }
    }

    fn set_time(&mut self, action: ActionHandle, time: f32) {
        if let Some(a) = self.action_mut(action) {
            a.time = time;
        }
    }

    fn time(&self, action: ActionHandle) -> Option<f32> {
        self.action(action).map(|a| a.time)
    }

    fn update(&mut self, delta: f32) {
        for action in &mut self.actions {
            if action.running && action.enabled && !action.paused {
                action.advance(delta);
            }
        }
        self.evaluate_pose();
    }

    fn stop_all_actions(&mut self) {
        for action in &mut self.actions {
            action.running = false;
            action.time = 0.0;
        }
    }

    fn uncache_root(&mut self) {
        if self.model.take().is_none() {
            log::warn!("Mixer root not found or already released");
        }
        self.actions.clear();
        self.meshes.clear();
        self.system.clear();
    }

    fn mark_world_matrices_dirty(&mut self) {
        for mesh in &mut self.meshes {
            mesh.needs_update = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::demo;

    fn ankle_mixer() -> (Mixer, Arc<Model>) {
        let model = Arc::new(demo::ankle());
        (Mixer::new(model.clone()), model)
    }

    fn start(mixer: &mut Mixer, clip: &AnimationClip, loop_mode: LoopMode) -> ActionHandle {
        let handle = mixer.clip_action(clip);
        mixer.configure(
            handle,
            ActionConfig {
                loop_mode,
                ..Default::default()
            },
        );
        mixer.reset(handle);
        mixer.play(handle);
        handle
    }

    #[test]
    fn clip_action_is_cached_per_clip() {
        let (mut mixer, model) = ankle_mixer();
        let a = mixer.clip_action(&model.clips[0]);
        let b = mixer.clip_action(&model.clips[0]);
        let c = mixer.clip_action(&model.clips[1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn repeat_wraps_and_once_clamps() {
        let (mut mixer, model) = ankle_mixer();
        let clip = &model.clips[0]; // 2.0s
        let handle = start(&mut mixer, clip, LoopMode::Repeat);
        mixer.update(2.5);
        assert!((mixer.time(handle).unwrap() - 0.5).abs() < 1e-5);

        mixer.configure(
            handle,
            ActionConfig {
                loop_mode: LoopMode::Once,
                ..Default::default()
            },
        );
        mixer.update(10.0);
        assert_eq!(mixer.time(handle), Some(2.0));
    }

    #[test]
    fn paused_action_does_not_advance() {
        let (mut mixer, model) = ankle_mixer();
        let handle = start(&mut mixer, &model.clips[0], LoopMode::Repeat);
        mixer.set_time(handle, 0.75);
        mixer.set_paused(handle, true);
        mixer.update(0.5);
        assert_eq!(mixer.time(handle), Some(0.75));
    }

    #[test]
    fn nan_time_samples_first_keyframe() {
        let (mut mixer, model) = ankle_mixer();
        let rest = mixer.bones()[3].abs_vector;
        let handle = start(&mut mixer, &model.clips[1], LoopMode::Repeat);
        mixer.set_time(handle, f32::NAN);
        mixer.update(0.0);
        assert!((mixer.bones()[3].abs_vector - rest).norm() < 1e-4);
    }

    #[test]
    fn non_finite_time_scale_keeps_previous_time() {
        let (mut mixer, model) = ankle_mixer();
        let handle = mixer.clip_action(&model.clips[0]);
        mixer.configure(
            handle,
            ActionConfig {
                time_scale: f32::INFINITY,
                ..Default::default()
            },
        );
        mixer.play(handle);
        mixer.set_time(handle, 0.4);
        mixer.update(0.5);
        assert_eq!(mixer.time(handle), Some(0.4));
    }

    #[test]
    fn time_scale_scales_delta() {
        let (mut mixer, model) = ankle_mixer();
        let handle = mixer.clip_action(&model.clips[0]);
        mixer.configure(
            handle,
            ActionConfig {
                time_scale: 0.5,
                ..Default::default()
            },
        );
        mixer.play(handle);
        mixer.update(1.0);
        assert!((mixer.time(handle).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn seek_dirties_meshes_until_refresh() {
        let (mut mixer, model) = ankle_mixer();
        let handle = start(&mut mixer, &model.clips[1], LoopMode::Repeat);
        mixer.set_paused(handle, true);

        let toes = mixer.meshes().iter().position(|m| m.name == "Toes").unwrap();
        let before = mixer.meshes()[toes].anchor();

        mixer.set_time(handle, 1.0);
        mixer.update(0.0);
        assert!(mixer.meshes().iter().all(|m| m.needs_update));

        assert_eq!(mixer.refresh_world_matrices(), model.meshes.len());
        assert!(mixer.meshes().iter().all(|m| !m.needs_update));
        let after = mixer.meshes()[toes].anchor();
        assert!((before - after).norm() > 1.0);
    }

    #[test]
    fn stopping_everything_restores_bind_pose() {
        let (mut mixer, model) = ankle_mixer();
        let rest = mixer.bones()[3].abs_vector;
        start(&mut mixer, &model.clips[1], LoopMode::Repeat);
        mixer.update(1.0);
        assert!((mixer.bones()[3].abs_vector - rest).norm() > 1.0);

        mixer.stop_all_actions();
        mixer.update(0.0);
        assert_eq!(mixer.running_action_count(), 0);
        assert!((mixer.bones()[3].abs_vector - rest).norm() < 1e-5);
    }

    #[test]
    fn uncache_root_releases_model() {
        let (mut mixer, model) = ankle_mixer();
        start(&mut mixer, &model.clips[0], LoopMode::Repeat);
        mixer.uncache_root();
        assert!(mixer.model().is_none());
        assert!(mixer.meshes().is_empty());
        assert_eq!(Arc::strong_count(&model), 1);
        // second release only warns
        mixer.uncache_root();
    }
}
