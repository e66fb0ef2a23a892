// Skeletal animation: keyframe sampling, pose evaluation and the mixer

pub mod controller;
pub mod interpolation;
pub mod mixer;
pub mod player;
pub mod skeleton;
pub mod system;
pub mod types;

pub use mixer::{ClipAction, MeshInstance, Mixer};
pub use player::{ActionConfig, ActionHandle, LoopMode, SkeletalPlayer};
pub use system::AnimationSystem;
pub use types::*;
