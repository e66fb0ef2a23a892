use crate::model::AnimationClip;

/// Handle to an action bound on a [`SkeletalPlayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap back to the start when the end is reached
    Repeat,
    /// Hold the last pose
    Once,
}

/// Playback parameters applied to an action when it is (re)started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionConfig {
    pub loop_mode: LoopMode,
    pub time_scale: f32,
    pub weight: f32,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::Repeat,
            time_scale: 1.0,
            weight: 1.0,
        }
    }
}

/// The engine side of skeletal animation: owns actions for a model and
/// advances them. Methods taking an unknown handle are no-ops.
pub trait SkeletalPlayer {
    /// Get or create the action for a clip.
    fn clip_action(&mut self, clip: &AnimationClip) -> ActionHandle;

    fn configure(&mut self, action: ActionHandle, config: ActionConfig);

    /// Rewind to the start, enabled and un-paused.
    fn reset(&mut self, action: ActionHandle);

    /// Schedule the action; it advances on `update` unless paused.
    fn play(&mut self, action: ActionHandle);

    /// Unschedule the action and rewind it.
    fn stop(&mut self, action: ActionHandle);

    fn set_enabled(&mut self, action: ActionHandle, enabled: bool);

    fn set_paused(&mut self, action: ActionHandle, paused: bool);

    fn set_time(&mut self, action: ActionHandle, time: f32);

    fn time(&self, action: ActionHandle) -> Option<f32>;

    /// Advance every scheduled action by `delta` seconds and re-evaluate the pose.
    fn update(&mut self, delta: f32);

    fn stop_all_actions(&mut self);

    /// Release the model so it can be dropped or reused.
    fn uncache_root(&mut self);

    /// Flag every mesh world matrix for recomputation before the next draw.
    fn mark_world_matrices_dirty(&mut self);
}
