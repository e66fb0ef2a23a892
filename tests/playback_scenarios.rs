use anatomy_viewer::animation::{Mixer, SkeletalPlayer};
use anatomy_viewer::model::{AnimationClip, Model, demo};
use anatomy_viewer::playback::{IgnoreReason, PlaybackCommand, PlaybackNotice, PlaybackOptions, PoseController};
use anatomy_viewer::ui::{PanelState, PlayIcon};
use std::sync::Arc;

type Controller = PoseController<Mixer, PanelState>;

fn controller_for(model: Model, options: PlaybackOptions) -> (Controller, Arc<Model>) {
    let model = Arc::new(model);
    let controller = PoseController::initialize(
        Mixer::new(model.clone()),
        model.clips.clone(),
        PanelState::default(),
        options,
    );
    (controller, model)
}

fn ankle() -> Controller {
    controller_for(demo::ankle(), PlaybackOptions::default()).0
}

fn ignored(operation: &'static str, reason: IgnoreReason) -> Option<PlaybackNotice> {
    Some(PlaybackNotice::ignored(operation, reason))
}

#[test]
fn effective_duration_is_longest_clip() {
    let c = ankle();
    assert_eq!(c.effective_duration(), 2.0);
    assert_eq!(c.controls().seek.max, 2.0);
    assert_eq!(c.controls().seek.step, 0.01);
}

#[test]
fn effective_duration_never_below_floor() {
    let (empty, _) = controller_for(demo::rotator_cuff(), PlaybackOptions::default());
    assert_eq!(empty.effective_duration(), 0.1);

    let mut model = demo::ankle();
    model.clips = vec![AnimationClip::still("Blink", 0.02)];
    let (short, _) = controller_for(model, PlaybackOptions::default());
    assert_eq!(short.effective_duration(), 0.1);
}

#[test]
fn rig_without_clips_hides_controls() {
    let (mut c, _) = controller_for(demo::rotator_cuff(), PlaybackOptions::default());
    assert_eq!(c.active_clip(), None);
    assert_eq!(c.controls().clip_name, "None");
    assert!(!c.controls().controls_visible);

    c.toggle_play();
    assert!(!c.is_playing());
    assert_eq!(c.last_notice().cloned(), ignored("toggle_play", IgnoreReason::NoActiveClip));
}

#[test]
fn scrub_while_paused_updates_seek_value() {
    let mut c = ankle();
    c.set_time(1.5);
    assert_eq!(c.current_time(), 1.5);
    assert_eq!(c.controls().seek.value, "1.500");
}

#[test]
fn seek_is_clamped_to_range() {
    let mut c = ankle();
    c.set_time(-3.0);
    assert_eq!(c.current_time(), 0.0);
    c.set_time(99.0);
    assert_eq!(c.current_time(), 2.0);
    assert_eq!(c.controls().seek.value, "2.000");
}

#[test]
fn step_clamps_at_end() {
    let mut c = ankle();
    c.set_time(1.9);
    c.step(0.5);
    assert_eq!(c.current_time(), 2.0);
    c.step(-5.0);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn step_commands_use_configured_increment() {
    let mut c = ankle();
    c.apply(PlaybackCommand::StepForward);
    c.apply(PlaybackCommand::StepForward);
    assert!((c.current_time() - 0.2).abs() < 1e-6);
    c.apply(PlaybackCommand::StepBack);
    assert!((c.current_time() - 0.1).abs() < 1e-6);
}

#[test]
fn seek_ignored_while_playing() {
    let mut c = ankle();
    c.toggle_play();
    assert!(c.is_playing());
    assert!(c.controls().seek.disabled);
    assert_eq!(c.controls().play_icon, PlayIcon::Pause);

    c.set_time(1.0);
    assert_eq!(c.current_time(), 0.0);
    assert_eq!(c.last_notice().cloned(), ignored("set_time", IgnoreReason::Playing));
}

#[test]
fn playback_advances_at_configured_rate() {
    let mut c = ankle();
    c.toggle_play();
    c.tick(0.3);
    assert!((c.current_time() - 0.15).abs() < 1e-5);
    assert_eq!(c.controls().seek.value, "0.150");
}

#[test]
fn pause_anchors_pose_exactly() {
    let mut c = ankle();
    c.toggle_play();
    c.tick(0.4);
    c.toggle_play();
    assert!(!c.is_playing());
    assert!(!c.controls().seek.disabled);
    assert_eq!(c.controls().play_icon, PlayIcon::Play);

    c.set_time(1.2);
    c.tick(0.5);
    c.tick(0.5);
    assert_eq!(c.current_time(), 1.2);
    assert_eq!(c.controls().seek.value, "1.200");
}

#[test]
fn pausing_picks_up_looped_time() {
    let mut c = ankle();
    c.toggle_play();
    // 5s at half speed wraps a 2s clip to 0.5s
    c.tick(5.0);
    c.toggle_play();
    assert!((c.current_time() - 0.5).abs() < 1e-4);
}

#[test]
fn clip_switch_resets_time() {
    let mut c = ankle();
    c.set_time(1.3);
    c.select_clip("Eversion");
    assert_eq!(c.active_clip(), Some("Eversion"));
    assert_eq!(c.current_time(), 0.0);
    assert_eq!(c.controls().clip_name, "Eversion");
    assert_eq!(c.controls().seek.value, "0.000");

    let mixer = c.player().unwrap();
    assert_eq!(mixer.running_action_count(), 1);
}

#[test]
fn unknown_clip_keeps_active_clip() {
    let mut c = ankle();
    c.select_clip("Walk");
    assert_eq!(c.active_clip(), Some("Dorsiflexion"));
    assert_eq!(c.controls().clip_name, "None");
    assert!(!c.controls().controls_visible);
    assert_eq!(c.last_notice(), Some(&PlaybackNotice::ClipNotFound("Walk".to_string())));

    c.set_time(0.5);
    assert_eq!(c.current_time(), 0.5);
}

#[test]
fn scrubbing_moves_the_pose() {
    let mut c = ankle();
    c.select_clip("Plantarflexion");
    let toes = c.player().unwrap().bones()[3].abs_vector;
    c.set_time(1.0);
    let mixer = c.player_mut().unwrap();
    assert!(mixer.meshes().iter().all(|m| m.needs_update));
    assert!((mixer.bones()[3].abs_vector - toes).norm() > 1.0);
    assert!(mixer.refresh_world_matrices() > 0);
}

#[test]
fn dispose_is_idempotent() {
    let (mut c, model) = controller_for(demo::ankle(), PlaybackOptions::default());
    c.toggle_play();
    c.dispose();
    assert!(!c.is_playing());
    assert_eq!(c.active_clip(), None);
    assert!(c.player().is_none());
    assert_eq!(Arc::strong_count(&model), 1);

    c.dispose();
    assert_eq!(c.last_notice().cloned(), ignored("dispose", IgnoreReason::MissingBinding));

    c.set_time(1.0);
    assert_eq!(c.current_time(), 0.0);
}

#[test]
fn once_mode_holds_last_pose() {
    let options = PlaybackOptions {
        loop_playback: false,
        playback_rate: 1.0,
        ..Default::default()
    };
    let (mut c, _) = controller_for(demo::ankle(), options);
    c.toggle_play();
    c.tick(10.0);
    assert_eq!(c.current_time(), 2.0);
    assert!(c.is_playing());
}

#[test]
fn negative_tick_does_not_rewind() {
    let mut c = ankle();
    c.toggle_play();
    c.tick(1.0);
    c.tick(-1.0);
    c.tick(f32::NAN);
    assert!((c.current_time() - 0.5).abs() < 1e-5);
}

#[test]
fn slider_command_seeks() {
    let mut c = ankle();
    c.apply(PlaybackCommand::Seek(0.75));
    assert_eq!(c.controls().seek.value, "0.750");
    c.apply(PlaybackCommand::SelectClip("Inversion".to_string()));
    assert_eq!(c.active_clip(), Some("Inversion"));
}

#[test]
fn unusable_configured_rate_still_plays_forward() {
    for rate in [f32::NAN, f32::INFINITY, -1.0] {
        let options = PlaybackOptions {
            playback_rate: rate,
            ..Default::default()
        };
        let (mut c, _) = controller_for(demo::ankle(), options);
        c.toggle_play();
        c.tick(0.5);
        assert!((c.current_time() - 0.25).abs() < 1e-5, "rate {rate}");
        c.toggle_play();
        assert!((0.0..=c.effective_duration()).contains(&c.current_time()));
    }
}
