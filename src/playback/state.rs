use crate::settings::{DEFAULT_DURATION_FLOOR, DEFAULT_PLAYBACK_RATE, PlaybackSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub active_clip: Option<String>,
    pub mode: PlaybackMode,
    pub current_time: f32,
    pub effective_duration: f32,
}

impl PlaybackState {
    pub fn new(effective_duration: f32) -> Self {
        Self {
            active_clip: None,
            mode: PlaybackMode::Paused,
            current_time: 0.0,
            effective_duration,
        }
    }

    pub fn clamp_time(&self, seconds: f32) -> f32 {
        seconds.clamp(0.0, self.effective_duration)
    }
}

/// Options fixed at controller initialization
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackOptions {
    pub enabled: bool,
    pub playback_rate: f32,
    pub step_seconds: f32,
    pub slider_step: f32,
    pub duration_floor: f32,
    pub loop_playback: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        PlaybackOptions::from(&PlaybackSettings::default())
    }
}

impl From<&PlaybackSettings> for PlaybackOptions {
    fn from(settings: &PlaybackSettings) -> Self {
        Self {
            enabled: settings.enable_animation,
            playback_rate: valid_rate(settings.playback_rate),
            step_seconds: settings.step_seconds,
            slider_step: settings.slider_step,
            duration_floor: settings.duration_floor,
            loop_playback: settings.loop_playback,
        }
    }
}

impl PlaybackOptions {
    pub fn duration_floor(&self) -> f32 {
        if self.duration_floor.is_finite() && self.duration_floor > 0.0 {
            self.duration_floor
        } else {
            DEFAULT_DURATION_FLOOR
        }
    }

    /// Replace values the player cannot run with their defaults
    pub fn sanitized(mut self) -> Self {
        self.playback_rate = valid_rate(self.playback_rate);
        self
    }
}

pub fn is_valid_rate(rate: f32) -> bool {
    rate.is_finite() && rate > 0.0
}

fn valid_rate(rate: f32) -> f32 {
    if is_valid_rate(rate) {
        rate
    } else {
        log::warn!("Playback rate {rate} is not a positive number, using {DEFAULT_PLAYBACK_RATE}");
        DEFAULT_PLAYBACK_RATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_configured_rates_fall_back_to_default() {
        for rate in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.0, -1.0] {
            let settings = PlaybackSettings {
                playback_rate: rate,
                ..Default::default()
            };
            assert_eq!(PlaybackOptions::from(&settings).playback_rate, DEFAULT_PLAYBACK_RATE);
        }
        let settings = PlaybackSettings {
            playback_rate: 2.0,
            ..Default::default()
        };
        assert_eq!(PlaybackOptions::from(&settings).playback_rate, 2.0);
    }
}
