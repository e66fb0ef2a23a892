use super::controls::PanelState;
use crate::playback::{PlaybackCommand, PlaybackNotice};

/// Read-only view of the controller the animation window needs besides the
/// control state itself.
pub struct PanelInfo<'a> {
    pub active_clip: Option<&'a str>,
    pub is_playing: bool,
    pub last_notice: Option<&'a PlaybackNotice>,
}

/// The animation window. Never touches the controller directly; the
/// commands the user issued this frame are returned instead.
pub fn show_animation_window(
    ctx: &egui::Context,
    panel: &PanelState,
    info: &PanelInfo<'_>,
    open: &mut bool,
) -> Vec<PlaybackCommand> {
    let mut commands = Vec::new();

    egui::Window::new("🎬 Animation")
        .default_width(320.0)
        .resizable(true)
        .open(open)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Animation:");
                ui.push_id(&panel.ids.clip_label, |ui| {
                    ui.label(egui::RichText::new(&panel.clip_name).strong());
                });
            });

            if !panel.controls_visible {
                ui.label("No animations in model");
                return;
            }

            ui.push_id(&panel.ids.controls_wrapper, |ui| {
                show_transport(ui, panel, &mut commands);
                ui.separator();
                show_clip_list(ui, panel, info.active_clip, &mut commands);
            });

            ui.separator();
            let state_text = if info.is_playing {
                format!("▶ Playing - {}s", panel.seek.value)
            } else {
                format!("⏸ Paused - {}s", panel.seek.value)
            };
            ui.label(egui::RichText::new(state_text).strong());

            if let Some(notice) = info.last_notice {
                ui.label(egui::RichText::new(notice.to_string()).small().weak());
            }
        });

    commands
}

fn show_transport(ui: &mut egui::Ui, panel: &PanelState, commands: &mut Vec<PlaybackCommand>) {
    let seek = &panel.seek;

    ui.horizontal(|ui| {
        let scrub_enabled = !seek.disabled;

        ui.push_id(&panel.ids.step_back, |ui| {
            if ui
                .add_enabled(scrub_enabled, egui::Button::new("⏮"))
                .on_hover_text("Step back (j)")
                .clicked()
            {
                commands.push(PlaybackCommand::StepBack);
            }
        });

        ui.push_id(&panel.ids.play_toggle, |ui| {
            if ui
                .button(panel.play_icon.glyph())
                .on_hover_text("Play / pause (space)")
                .clicked()
            {
                commands.push(PlaybackCommand::TogglePlay);
            }
        });

        ui.push_id(&panel.ids.step_forward, |ui| {
            if ui
                .add_enabled(scrub_enabled, egui::Button::new("⏭"))
                .on_hover_text("Step forward (k)")
                .clicked()
            {
                commands.push(PlaybackCommand::StepForward);
            }
        });
    });

    ui.horizontal(|ui| {
        ui.label("Time:");
        let mut value = seek.value_seconds();
        let slider = egui::Slider::new(&mut value, seek.min..=seek.max)
            .step_by(f64::from(seek.step))
            .fixed_decimals(3)
            .suffix(" s");
        let response = ui.push_id(&panel.ids.seek_control, |ui| ui.add_enabled(!seek.disabled, slider)).inner;
        if response.changed() {
            commands.push(PlaybackCommand::Seek(value));
        }
    });
}

fn show_clip_list(
    ui: &mut egui::Ui,
    panel: &PanelState,
    active_clip: Option<&str>,
    commands: &mut Vec<PlaybackCommand>,
) {
    ui.label("Animations:");
    egui::ScrollArea::vertical()
        .max_height(160.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            for name in &panel.clip_names {
                let is_selected = active_clip == Some(name.as_str());
                if ui.selectable_label(is_selected, name).clicked() && !is_selected {
                    commands.push(PlaybackCommand::SelectClip(name.clone()));
                }
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::controls::ControlSurface;

    fn run_frame(panel: &PanelState, info: &PanelInfo<'_>) -> Vec<PlaybackCommand> {
        let ctx = egui::Context::default();
        let mut commands = Vec::new();
        let mut open = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            commands = show_animation_window(ctx, panel, info, &mut open);
        });
        commands
    }

    #[test]
    fn idle_frame_issues_no_commands() {
        let mut panel = PanelState::default();
        panel.configure_seek(0.0, 2.0, 0.01);
        panel.set_clip_list(&["Flexion".to_string(), "Extension".to_string()]);
        panel.set_clip_name("Flexion");
        panel.set_controls_visible(true);
        let info = PanelInfo {
            active_clip: Some("Flexion"),
            is_playing: false,
            last_notice: None,
        };
        assert!(run_frame(&panel, &info).is_empty());
    }

    #[test]
    fn hidden_controls_render_label_only() {
        let panel = PanelState::default();
        let notice = PlaybackNotice::ClipNotFound("Walk".to_string());
        let info = PanelInfo {
            active_clip: None,
            is_playing: false,
            last_notice: Some(&notice),
        };
        assert!(run_frame(&panel, &info).is_empty());
    }
}
