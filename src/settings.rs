use crate::CONFY_APP_NAME;
use crate::error::ViewerError;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Smallest seek range the controller will configure, in seconds.
pub const DEFAULT_DURATION_FLOOR: f32 = 0.1;

/// Playback speed used when the configured one is unusable.
pub const DEFAULT_PLAYBACK_RATE: f32 = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    pub enable_animation: bool,
    pub playback_rate: f32,
    pub step_seconds: f32,
    pub slider_step: f32,
    pub duration_floor: f32,
    pub loop_playback: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            enable_animation: true,
            playback_rate: DEFAULT_PLAYBACK_RATE,
            step_seconds: 0.1,
            slider_step: 0.01,
            duration_floor: DEFAULT_DURATION_FLOOR,
            loop_playback: true,
        }
    }
}

impl PlaybackSettings {
    pub fn load() -> Self {
        load_or_default("playback")
    }

    pub fn save(&self) {
        store(self, "playback");
    }
}

/// Identifiers of the animation controls, used as widget id salts by the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlIds {
    pub seek_control: String,
    pub play_toggle: String,
    pub step_back: String,
    pub step_forward: String,
    pub clip_label: String,
    pub play_icon: String,
    pub controls_wrapper: String,
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            seek_control: "animationSlider".to_string(),
            play_toggle: "playAnimationsBtn".to_string(),
            step_back: "stepBackBtn".to_string(),
            step_forward: "stepForwardBtn".to_string(),
            clip_label: "animationNameText".to_string(),
            play_icon: "playIcon".to_string(),
            controls_wrapper: "animationControlsWrapper".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub step_back: String,
    pub step_forward: String,
    pub toggle_play: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            step_back: "j".to_string(),
            step_forward: "k".to_string(),
            toggle_play: "space".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlSettings {
    pub ids: ControlIds,
    pub keys: KeyBindings,
}

impl ControlSettings {
    pub fn load() -> Self {
        load_or_default("controls")
    }

    pub fn save(&self) {
        store(self, "controls");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub show_skeleton: bool,
    pub show_labels: bool,
    pub far_plane: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_skeleton: true,
            show_labels: true,
            far_plane: 1000.0,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        load_or_default("display")
    }

    pub fn save(&self) {
        store(self, "display");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSettings {
    pub background_color: [f32; 3],
    pub bone_color: [f32; 3],
    pub label_color: [f32; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.02],
            bone_color: [0.9, 0.85, 0.7],
            label_color: [0.6, 0.8, 1.0],
        }
    }
}

impl ColorSettings {
    pub fn load() -> Self {
        load_or_default("colors")
    }

    pub fn save(&self) {
        store(self, "colors");
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    pub show_animation: bool,
    pub show_display_settings: bool,
    pub show_colors: bool,
    pub show_model_info: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_animation: true,
            show_display_settings: false,
            show_colors: false,
            show_model_info: true,
        }
    }
}

impl UiSettings {
    pub fn load() -> Self {
        load_or_default("ui")
    }

    pub fn save(&self) {
        store(self, "ui");
    }
}

/// confy returns an error for a file it cannot parse; the group then starts
/// from its defaults.
fn load_or_default<T: Serialize + DeserializeOwned + Default>(name: &'static str) -> T {
    match confy::load(CONFY_APP_NAME, name) {
        Ok(value) => value,
        Err(err) => {
            let err = ViewerError::from(err).with_arg("config", name);
            log::warn!("Failed to load settings, using defaults: {err}");
            T::default()
        }
    }
}

fn store<T: Serialize>(value: &T, name: &'static str) {
    if let Err(err) = confy::store(CONFY_APP_NAME, name, value) {
        let err = ViewerError::from(err).with_arg("config", name);
        log::warn!("Failed to save settings: {err}");
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlSettings,
    pub display: DisplaySettings,
    pub colors: ColorSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            playback: PlaybackSettings::load(),
            controls: ControlSettings::load(),
            display: DisplaySettings::load(),
            colors: ColorSettings::load(),
            ui: UiSettings::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playback_defaults_match_viewer_behaviour() {
        let playback = PlaybackSettings::default();
        assert!(playback.enable_animation);
        assert_eq!(playback.step_seconds, 0.1);
        assert_eq!(playback.slider_step, 0.01);
        assert_eq!(playback.duration_floor, DEFAULT_DURATION_FLOOR);
        assert!(playback.loop_playback);
    }

    #[test]
    fn partial_playback_config_does_not_deserialize() {
        // every field is required, so a partial file takes the load_or_default path
        let parsed: Result<PlaybackSettings, _> = serde_json::from_str(r#"{"playback_rate": 1.0}"#);
        assert!(parsed.is_err());
    }
}
