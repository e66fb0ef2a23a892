use thiserror::Error;

/// Why a playback operation was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Seeking races autonomous playback
    Playing,
    NoActiveClip,
    InvalidTime,
    /// No player bound, e.g. after dispose
    MissingBinding,
    Disabled,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IgnoreReason::Playing => "playback is running",
            IgnoreReason::NoActiveClip => "no clip is active",
            IgnoreReason::InvalidTime => "time is not a number",
            IgnoreReason::MissingBinding => "no player is bound",
            IgnoreReason::Disabled => "animation is disabled",
        };
        f.write_str(text)
    }
}

/// Recoverable playback conditions. These are logged and remembered by the
/// controller, never returned as errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackNotice {
    #[error("animation \"{0}\" not found")]
    ClipNotFound(String),
    #[error("{operation} ignored: {reason}")]
    Ignored {
        operation: &'static str,
        reason: IgnoreReason,
    },
    #[error("playback rate {0} rejected")]
    InvalidRate(String),
}

impl PlaybackNotice {
    pub fn ignored(operation: &'static str, reason: IgnoreReason) -> Self {
        PlaybackNotice::Ignored { operation, reason }
    }
}
