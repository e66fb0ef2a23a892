/// User intents routed into the pose controller
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    TogglePlay,
    StepBack,
    StepForward,
    Seek(f32),
    SelectClip(String),
}
