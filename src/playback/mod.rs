// Playback control: mediates between free playback and manual scrubbing

pub mod command;
pub mod controller;
pub mod notice;
pub mod state;

pub use command::PlaybackCommand;
pub use controller::{NO_CLIP_LABEL, PoseController};
pub use notice::{IgnoreReason, PlaybackNotice};
pub use state::{PlaybackMode, PlaybackOptions, PlaybackState};
