#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    DontInterp,
    Linear,
    Hermite,
    Bezier,
}

#[derive(Debug, Clone)]
pub struct Keyframe {
    pub time: f32,
    pub data: Vec<f32>,
    pub in_tan: Vec<f32>,
    pub out_tan: Vec<f32>,
}

impl Keyframe {
    pub fn new(time: f32, data: &[f32]) -> Self {
        Self {
            time,
            data: data.to_vec(),
            in_tan: Vec::new(),
            out_tan: Vec::new(),
        }
    }
}

/// Animation controller data (keyframes sorted by time)
#[derive(Debug, Clone)]
pub struct AnimationController {
    pub interpolation: Interpolation,
    pub keyframes: Vec<Keyframe>,
}

impl AnimationController {
    pub fn linear(keyframes: Vec<Keyframe>) -> Self {
        Self {
            interpolation: Interpolation::Linear,
            keyframes,
        }
    }
}

/// Keyframe channels driving one bone. Rotation data is a quaternion `[x, y, z, w]`.
#[derive(Debug, Clone, Default)]
pub struct BoneTrack {
    pub bone_id: u32,
    pub translation: Option<AnimationController>,
    pub rotation: Option<AnimationController>,
    pub scaling: Option<AnimationController>,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<BoneTrack>,
}

impl AnimationClip {
    pub fn new(name: &str, duration: f32, tracks: Vec<BoneTrack>) -> Self {
        Self {
            name: name.to_string(),
            duration,
            tracks,
        }
    }

    /// A clip with no tracks; evaluates to the bind pose at any time.
    pub fn still(name: &str, duration: f32) -> Self {
        Self::new(name, duration, Vec::new())
    }
}
