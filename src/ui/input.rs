use crate::playback::PlaybackCommand;
use crate::settings::KeyBindings;

use winit::keyboard::{Key, NamedKey};

/// Lower-case name of a logical key as used in [`KeyBindings`]
pub fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(text) => Some(text.to_lowercase()),
        Key::Named(NamedKey::Space) => Some("space".to_string()),
        Key::Named(named) => Some(format!("{named:?}").to_lowercase()),
        _ => None,
    }
}

/// Map a key press to a playback command. Nothing fires while a text field
/// owns the keyboard.
pub fn command_for_key(key: &Key, bindings: &KeyBindings, text_focused: bool) -> Option<PlaybackCommand> {
    if text_focused {
        return None;
    }
    let name = key_name(key)?;
    let matches = |binding: &str| binding.eq_ignore_ascii_case(&name);

    if matches(&bindings.step_back) {
        Some(PlaybackCommand::StepBack)
    } else if matches(&bindings.step_forward) {
        Some(PlaybackCommand::StepForward)
    } else if matches(&bindings.toggle_play) {
        Some(PlaybackCommand::TogglePlay)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(
            command_for_key(&Key::Character("j".into()), &keys, false),
            Some(PlaybackCommand::StepBack)
        );
        assert_eq!(
            command_for_key(&Key::Character("K".into()), &keys, false),
            Some(PlaybackCommand::StepForward)
        );
        assert_eq!(
            command_for_key(&Key::Named(NamedKey::Space), &keys, false),
            Some(PlaybackCommand::TogglePlay)
        );
        assert_eq!(command_for_key(&Key::Character("x".into()), &keys, false), None);
    }

    #[test]
    fn text_focus_suppresses_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(command_for_key(&Key::Character("j".into()), &keys, true), None);
        assert_eq!(command_for_key(&Key::Named(NamedKey::Space), &keys, true), None);
    }

    #[test]
    fn rebinding_to_named_key() {
        let keys = KeyBindings {
            toggle_play: "Enter".to_string(),
            ..Default::default()
        };
        assert_eq!(
            command_for_key(&Key::Named(NamedKey::Enter), &keys, false),
            Some(PlaybackCommand::TogglePlay)
        );
        assert_eq!(command_for_key(&Key::Named(NamedKey::Space), &keys, false), None);
    }
}
