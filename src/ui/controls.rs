use crate::settings::ControlIds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

/// The widgets the pose controller writes to. Surfaces lacking an element
/// keep the default no-op.
pub trait ControlSurface {
    fn configure_seek(&mut self, min: f32, max: f32, step: f32);

    fn set_seek_value(&mut self, value: f32);

    fn set_seek_disabled(&mut self, disabled: bool);

    fn set_clip_name(&mut self, _name: &str) {}

    fn set_play_icon(&mut self, _icon: PlayIcon) {}

    fn set_controls_visible(&mut self, _visible: bool) {}

    fn set_clip_list(&mut self, _names: &[String]) {}
}

/// Range input state
#[derive(Debug, Clone, PartialEq)]
pub struct SeekControl {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub value: String,
    pub disabled: bool,
}

impl Default for SeekControl {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            step: 0.01,
            value: format_seek_value(0.0),
            disabled: false,
        }
    }
}

impl SeekControl {
    pub fn value_seconds(&self) -> f32 {
        self.value.parse().unwrap_or(self.min)
    }
}

pub fn format_seek_value(seconds: f32) -> String {
    format!("{seconds:.3}")
}

/// Everything the animation panel renders
#[derive(Debug, Clone)]
pub struct PanelState {
    pub ids: ControlIds,
    pub seek: SeekControl,
    pub clip_name: String,
    pub play_icon: PlayIcon,
    pub controls_visible: bool,
    pub clip_names: Vec<String>,
}

impl PanelState {
    pub fn new(ids: ControlIds) -> Self {
        Self {
            ids,
            seek: SeekControl::default(),
            clip_name: "None".to_string(),
            play_icon: PlayIcon::Play,
            controls_visible: false,
            clip_names: Vec::new(),
        }
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(ControlIds::default())
    }
}

impl ControlSurface for PanelState {
    fn configure_seek(&mut self, min: f32, max: f32, step: f32) {
        self.seek.min = min;
        self.seek.max = max;
        self.seek.step = step;
    }

    fn set_seek_value(&mut self, value: f32) {
        self.seek.value = format_seek_value(value);
    }

    fn set_seek_disabled(&mut self, disabled: bool) {
        self.seek.disabled = disabled;
    }

    fn set_clip_name(&mut self, name: &str) {
        self.clip_name = name.to_string();
    }

    fn set_play_icon(&mut self, icon: PlayIcon) {
        self.play_icon = icon;
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    fn set_clip_list(&mut self, names: &[String]) {
        self.clip_names = names.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_value_is_shown_with_three_decimals() {
        let mut panel = PanelState::default();
        panel.set_seek_value(1.5);
        assert_eq!(panel.seek.value, "1.500");
        assert_eq!(panel.seek.value_seconds(), 1.5);
    }

    #[test]
    fn fresh_panel_shows_no_clip() {
        let panel = PanelState::default();
        assert_eq!(panel.clip_name, "None");
        assert!(!panel.controls_visible);
        assert_eq!(panel.ids.seek_control, "animationSlider");
    }
}
