use super::controls::PanelState;
use super::panel::{PanelInfo, show_animation_window};
use crate::model::{Model, StructureKind, demo};
use crate::playback::PlaybackCommand;
use crate::settings::Settings;

/// What the user asked for this frame
#[derive(Debug, Default)]
pub struct UiResponse {
    pub commands: Vec<PlaybackCommand>,
    pub select_rig: Option<&'static str>,
    pub reset_camera: bool,
}

pub struct Ui {
    selected_mesh: Option<usize>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self { selected_mesh: None }
    }

    /// Forget per-model selections when a new rig is loaded
    pub fn reset_model(&mut self) {
        self.selected_mesh = None;
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        panel: &PanelState,
        info: &PanelInfo<'_>,
        model: Option<&Model>,
        settings: &mut Settings,
    ) -> UiResponse {
        let mut response = UiResponse::default();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label("🦴 Rig:");
                let current = model.map(|m| m.name.as_str()).unwrap_or("-");
                egui::ComboBox::from_id_salt("rig_selector")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for name in demo::RIG_NAMES {
                            if ui.selectable_label(false, name).clicked() {
                                response.select_rig = Some(name);
                            }
                        }
                    });

                ui.separator();
                ui.label("📋 Windows:");
                let mut toggled = false;
                toggled |= toggle_button(ui, "Animation", &mut settings.ui.show_animation);
                toggled |= toggle_button(ui, "Display", &mut settings.ui.show_display_settings);
                toggled |= toggle_button(ui, "Colors", &mut settings.ui.show_colors);
                toggled |= toggle_button(ui, "Model Info", &mut settings.ui.show_model_info);
                if toggled {
                    settings.ui.save();
                }
            });
        });

        if settings.ui.show_animation {
            let mut open = true;
            response.commands = show_animation_window(ctx, panel, info, &mut open);
            if !open {
                settings.ui.show_animation = false;
                settings.ui.save();
            }
        }

        if settings.ui.show_display_settings {
            response.reset_camera = self.show_display_settings_window(ctx, settings);
        }

        if settings.ui.show_colors {
            self.show_colors_window(ctx, settings);
        }

        if settings.ui.show_model_info {
            self.show_model_info_window(ctx, model, settings);
        }

        response
    }

    fn show_display_settings_window(&mut self, ctx: &egui::Context, settings: &mut Settings) -> bool {
        let mut reset_camera = false;

        egui::Window::new("🎨 Display Settings")
            .default_width(300.0)
            .resizable(true)
            .open(&mut settings.ui.show_display_settings)
            .show(ctx, |ui| {
                let mut changed = false;

                changed |= ui.checkbox(&mut settings.display.show_skeleton, "Show Skeleton").changed();
                changed |= ui.checkbox(&mut settings.display.show_labels, "Show Labels").changed();

                ui.separator();
                ui.label("Far Plane (View Distance):");
                changed |= ui
                    .add(
                        egui::Slider::new(&mut settings.display.far_plane, 100.0..=5000.0)
                            .suffix(" units")
                            .logarithmic(true),
                    )
                    .changed();

                if changed {
                    settings.display.save();
                }

                ui.separator();
                if ui.button("Reset Camera").clicked() {
                    reset_camera = true;
                }
            });

        if !settings.ui.show_display_settings {
            settings.ui.save();
        }

        reset_camera
    }

    fn show_colors_window(&mut self, ctx: &egui::Context, settings: &mut Settings) {
        egui::Window::new("🌈 Colors")
            .default_width(300.0)
            .resizable(true)
            .open(&mut settings.ui.show_colors)
            .show(ctx, |ui| {
                let mut changed = false;

                ui.label("Background:");
                changed |= ui.color_edit_button_rgb(&mut settings.colors.background_color).changed();
                ui.label("Bones:");
                changed |= ui.color_edit_button_rgb(&mut settings.colors.bone_color).changed();
                ui.label("Labels:");
                changed |= ui.color_edit_button_rgb(&mut settings.colors.label_color).changed();

                if changed {
                    settings.colors.save();
                }
            });

        if !settings.ui.show_colors {
            settings.ui.save();
        }
    }

    fn show_model_info_window(&mut self, ctx: &egui::Context, model: Option<&Model>, settings: &mut Settings) {
        egui::Window::new("ℹ️ Model Info")
            .default_width(300.0)
            .resizable(true)
            .open(&mut settings.ui.show_model_info)
            .show(ctx, |ui| {
                let Some(model) = model else {
                    ui.label("No model loaded");
                    return;
                };

                ui.label(egui::RichText::new(&model.name).strong());
                ui.label(format!("Bones: {}", model.bones.len()));
                ui.label(format!("Structures: {}", model.meshes.len()));
                ui.label(format!("Animations: {}", model.clips.len()));
                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(240.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for kind in [StructureKind::Bone, StructureKind::Muscle, StructureKind::Ligament, StructureKind::Other] {
                            let mut members = model.meshes.iter().enumerate().filter(|(_, m)| m.kind == kind).peekable();
                            if members.peek().is_none() {
                                continue;
                            }
                            egui::CollapsingHeader::new(format!("{kind:?}"))
                                .id_salt(("structure_kind", kind as u8))
                                .default_open(true)
                                .show(ui, |ui| {
                                    for (i, mesh) in members {
                                        let selected = self.selected_mesh == Some(i);
                                        if ui.selectable_label(selected, &mesh.name).clicked() {
                                            self.selected_mesh = if selected { None } else { Some(i) };
                                        }
                                    }
                                });
                        }
                    });

                if let Some(mesh) = self.selected_mesh.and_then(|i| model.meshes.get(i)) {
                    ui.separator();
                    ui.label(egui::RichText::new(&mesh.name).strong());
                    ui.label(&mesh.info);
                }
            });

        if !settings.ui.show_model_info {
            settings.ui.save();
        }
    }
}

fn toggle_button(ui: &mut egui::Ui, label: &str, open: &mut bool) -> bool {
    let text = if *open {
        format!("✅ {label}")
    } else {
        format!("⬜ {label}")
    };
    let clicked = ui.button(text).clicked();
    if clicked {
        *open = !*open;
    }
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_frame_without_input_requests_nothing() {
        let ctx = egui::Context::default();
        let mut ui = Ui::new();
        let mut settings = Settings::default();
        let model = demo::ankle();
        let panel = PanelState::default();
        let info = PanelInfo {
            active_clip: None,
            is_playing: false,
            last_notice: None,
        };

        let mut response = UiResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            response = ui.show(ctx, &panel, &info, Some(&model), &mut settings);
        });

        assert!(response.commands.is_empty());
        assert!(response.select_rig.is_none());
        assert!(!response.reset_camera);
        assert!(settings.ui.show_animation);
    }
}
