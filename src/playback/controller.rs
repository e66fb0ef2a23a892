use super::command::PlaybackCommand;
use super::notice::{IgnoreReason, PlaybackNotice};
use super::state::{PlaybackMode, PlaybackOptions, PlaybackState, is_valid_rate};
use crate::animation::{ActionConfig, ActionHandle, LoopMode, SkeletalPlayer};
use crate::model::AnimationClip;
use crate::ui::controls::{ControlSurface, PlayIcon};

/// Label shown when no clip is bound
pub const NO_CLIP_LABEL: &str = "None";

/// Mediates between free playback and manual scrubbing of a skeletal player,
/// keeping the player, the seek control and the rendered pose consistent.
///
/// `tick` only advances the player while playing, and seeking is refused while
/// playing, so the two sources of time changes never overlap.
pub struct PoseController<P: SkeletalPlayer, C: ControlSurface> {
    player: Option<P>,
    clips: Vec<AnimationClip>,
    controls: C,
    options: PlaybackOptions,
    state: PlaybackState,
    action: Option<ActionHandle>,
    last_notice: Option<PlaybackNotice>,
}

impl<P: SkeletalPlayer, C: ControlSurface> PoseController<P, C> {
    /// Bind `player` to `clips` and `controls`. With at least one clip the
    /// first one is bound, paused at time zero, and its pose applied.
    pub fn initialize(player: P, clips: Vec<AnimationClip>, controls: C, options: PlaybackOptions) -> Self {
        let options = options.sanitized();
        let effective_duration = clips
            .iter()
            .map(|c| c.duration)
            .filter(|d| d.is_finite())
            .fold(options.duration_floor(), f32::max);

        let mut controller = Self {
            player: Some(player),
            clips,
            controls,
            options,
            state: PlaybackState::new(effective_duration),
            action: None,
            last_notice: None,
        };

        let names = controller.clip_names();
        let controls = &mut controller.controls;
        controls.configure_seek(0.0, effective_duration, controller.options.slider_step);
        controls.set_seek_value(0.0);
        controls.set_seek_disabled(false);
        controls.set_play_icon(PlayIcon::Play);
        controls.set_clip_list(&names);

        if !controller.options.enabled || controller.clips.is_empty() {
            log::info!("Animations disabled or missing. Skipping setup.");
            controller.controls.set_clip_name(NO_CLIP_LABEL);
            controller.controls.set_controls_visible(false);
            return controller;
        }

        log::info!("{} animation(s) loaded.", controller.clips.len());
        for (i, clip) in controller.clips.iter().enumerate() {
            log::debug!("   [{i}] \"{}\" - {:.2}s", clip.name, clip.duration);
        }

        let first = controller.clips[0].name.clone();
        controller.select_clip(&first);

        log::info!("Pose controller ready. Duration: {effective_duration:.2}s");
        controller
    }

    /// Bind the first clip named `name`. An unknown name keeps the current
    /// binding and only resets the label.
    pub fn select_clip(&mut self, name: &str) {
        if !self.options.enabled {
            self.ignore("select_clip", IgnoreReason::Disabled);
            return;
        }
        let config = self.action_config();
        let paused = self.state.mode == PlaybackMode::Paused;

        let Some(player) = self.player.as_mut() else {
            self.ignore("select_clip", IgnoreReason::MissingBinding);
            return;
        };
        let Some(clip) = self.clips.iter().find(|c| c.name == name) else {
            let notice = PlaybackNotice::ClipNotFound(name.to_string());
            log::warn!("{notice}");
            self.last_notice = Some(notice);
            self.controls.set_clip_name(NO_CLIP_LABEL);
            self.controls.set_controls_visible(false);
            return;
        };

        if let Some(previous) = self.action.take() {
            player.stop(previous);
        }

        let handle = player.clip_action(clip);
        player.configure(handle, config);
        player.reset(handle);
        player.play(handle);
        player.set_paused(handle, paused);

        self.action = Some(handle);
        self.state.active_clip = Some(clip.name.clone());
        self.state.current_time = 0.0;
        self.last_notice = None;

        self.controls.set_clip_name(name);
        self.controls.set_controls_visible(true);
        self.apply_pose();

        log::info!("Animation bound: {name}");
    }

    pub fn toggle_play(&mut self) {
        if self.player.is_none() {
            self.ignore("toggle_play", IgnoreReason::MissingBinding);
            return;
        }
        let Some(handle) = self.action else {
            self.ignore("toggle_play", IgnoreReason::NoActiveClip);
            return;
        };
        let Some(player) = self.player.as_mut() else {
            return;
        };

        match self.state.mode {
            PlaybackMode::Paused => {
                self.state.mode = PlaybackMode::Playing;
                player.set_paused(handle, false);
                self.controls.set_seek_disabled(true);
                self.controls.set_play_icon(PlayIcon::Pause);
                log::debug!("Playing");
            }
            PlaybackMode::Playing => {
                // the player may have looped; it is authoritative
                let time = player.time(handle).unwrap_or(self.state.current_time);
                self.state.mode = PlaybackMode::Paused;
                self.state.current_time = self.state.clamp_time(time);
                self.apply_pose();
                self.controls.set_seek_disabled(false);
                self.controls.set_play_icon(PlayIcon::Play);
                log::debug!("Paused at {:.3}s", self.state.current_time);
            }
        }
        self.last_notice = None;
    }

    /// Seek to `seconds`, clamped to the seek range. Only honoured while paused.
    pub fn set_time(&mut self, seconds: f32) {
        if let Some(reason) = self.seek_blocker() {
            self.ignore("set_time", reason);
            return;
        }
        if seconds.is_nan() {
            self.ignore("set_time", IgnoreReason::InvalidTime);
            return;
        }

        self.state.current_time = self.state.clamp_time(seconds);
        self.apply_pose();
        self.last_notice = None;

        log::debug!("Time set to {:.3}s", self.state.current_time);
    }

    pub fn step(&mut self, delta_seconds: f32) {
        if let Some(reason) = self.seek_blocker() {
            self.ignore("step", reason);
            return;
        }
        let target = self.state.clamp_time(self.state.current_time + delta_seconds);
        self.set_time(target);
    }

    /// Per-frame hook. Advances the player only while playing.
    pub fn tick(&mut self, delta_seconds: f32) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        if self.state.mode == PlaybackMode::Paused {
            return;
        }

        let delta = if delta_seconds.is_finite() && delta_seconds > 0.0 {
            delta_seconds
        } else {
            0.0
        };
        player.update(delta);

        if let Some(time) = self.action.and_then(|h| player.time(h)) {
            self.state.current_time = self.state.clamp_time(time);
        }
        self.controls.set_seek_value(self.state.current_time);
    }

    /// Stop everything and release the player. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        let Some(mut player) = self.player.take() else {
            self.ignore("dispose", IgnoreReason::MissingBinding);
            return;
        };

        if let Some(handle) = self.action.take() {
            player.stop(handle);
        }
        player.stop_all_actions();
        player.uncache_root();

        self.state.active_clip = None;
        self.state.mode = PlaybackMode::Paused;
        self.state.current_time = 0.0;

        self.controls.set_clip_name(NO_CLIP_LABEL);
        self.controls.set_play_icon(PlayIcon::Play);
        self.controls.set_controls_visible(false);

        log::info!("Pose controller disposed.");
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        if !is_valid_rate(rate) {
            let notice = PlaybackNotice::InvalidRate(rate.to_string());
            log::warn!("{notice}");
            self.last_notice = Some(notice);
            return;
        }
        self.options.playback_rate = rate;
        let config = self.action_config();
        if let (Some(player), Some(handle)) = (self.player.as_mut(), self.action) {
            player.configure(handle, config);
        }
    }

    pub fn apply(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::TogglePlay => self.toggle_play(),
            PlaybackCommand::StepBack => self.step(-self.options.step_seconds),
            PlaybackCommand::StepForward => self.step(self.options.step_seconds),
            PlaybackCommand::Seek(seconds) => self.set_time(seconds),
            PlaybackCommand::SelectClip(name) => self.select_clip(&name),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.mode == PlaybackMode::Playing
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn active_clip(&self) -> Option<&str> {
        self.state.active_clip.as_deref()
    }

    pub fn current_time(&self) -> f32 {
        self.state.current_time
    }

    pub fn effective_duration(&self) -> f32 {
        self.state.effective_duration
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    pub fn last_notice(&self) -> Option<&PlaybackNotice> {
        self.last_notice.as_ref()
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.player.as_mut()
    }

    /// Clip names in load order, keeping only the first of duplicates
    pub fn clip_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.clips.len());
        for clip in &self.clips {
            if !names.contains(&clip.name) {
                names.push(clip.name.clone());
            }
        }
        names
    }

    fn action_config(&self) -> ActionConfig {
        ActionConfig {
            loop_mode: if self.options.loop_playback {
                LoopMode::Repeat
            } else {
                LoopMode::Once
            },
            time_scale: self.options.playback_rate,
            weight: 1.0,
        }
    }

    fn seek_blocker(&self) -> Option<IgnoreReason> {
        if self.player.is_none() {
            Some(IgnoreReason::MissingBinding)
        } else if self.state.mode == PlaybackMode::Playing {
            Some(IgnoreReason::Playing)
        } else if self.action.is_none() {
            Some(IgnoreReason::NoActiveClip)
        } else {
            None
        }
    }

    /// Re-evaluate the pose at `current_time` without advancing the clock.
    fn apply_pose(&mut self) {
        let time = self.state.current_time;
        let paused = self.state.mode == PlaybackMode::Paused;
        if let (Some(player), Some(handle)) = (self.player.as_mut(), self.action) {
            player.set_enabled(handle, true);
            if paused {
                player.set_paused(handle, true);
            }
            player.set_time(handle, time);
            player.play(handle);
            player.update(0.0);
            player.mark_world_matrices_dirty();
        }
        self.controls.set_seek_value(time);
    }

    fn ignore(&mut self, operation: &'static str, reason: IgnoreReason) {
        let notice = PlaybackNotice::ignored(operation, reason);
        log::debug!("{notice}");
        self.last_notice = Some(notice);
    }
}
