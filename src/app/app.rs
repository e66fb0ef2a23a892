use crate::animation::Mixer;
use crate::error::ViewerError;
use crate::model::{Model, demo};
use crate::playback::{PlaybackOptions, PoseController};
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraController, CameraState};
use crate::settings::Settings;
use crate::ui::input::command_for_key;
use crate::ui::viewport::paint_overlay;
use crate::ui::{PanelInfo, PanelState, Ui, UiResponse};
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use std::sync::Arc;
use std::time::Instant;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

impl EventResponse {
    fn idle() -> Self {
        Self {
            repaint: false,
            exit: false,
        }
    }
}

pub type Controller = PoseController<Mixer, PanelState>;

pub struct App {
    pub window: Arc<Window>,
    ui: Ui,
    model: Option<Arc<Model>>,
    controller: Option<Controller>,
    renderer: Renderer,
    camera_controller: CameraController,
    egui_state: State,
    egui_wants_pointer: bool,
    egui_wants_keyboard: bool,
    settings: Settings,
    last_frame: Instant,
}

impl App {
    pub async fn new(window: Arc<Window>, settings: Settings) -> Result<Self, ViewerError> {
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &*window,
            None,
            None,
            None,
        );

        Ok(Self {
            window,
            ui: Ui::new(),
            model: None,
            controller: None,
            renderer,
            camera_controller: CameraController::new(CameraState::default()),
            egui_state,
            egui_wants_pointer: false,
            egui_wants_keyboard: false,
            settings,
            last_frame: Instant::now(),
        })
    }

    /// Replace the current rig. The previous controller is disposed before the
    /// new one is initialized.
    pub fn load_rig(&mut self, name: &str) -> Result<(), ViewerError> {
        let model = demo::by_name(name).ok_or_else(|| {
            ViewerError::new("unknown-rig")
                .with_arg("name", name)
                .with_arg("available", demo::RIG_NAMES.join(","))
        })?;

        if let Some(mut previous) = self.controller.take() {
            previous.dispose();
        }

        log::info!("Loading rig: {}", model.name);
        let model = Arc::new(model);
        let controller = PoseController::initialize(
            Mixer::new(model.clone()),
            model.clips.clone(),
            PanelState::new(self.settings.controls.ids.clone()),
            PlaybackOptions::from(&self.settings.playback),
        );

        let center = model.center();
        self.camera_controller.state_mut().focus(center, 120.0);
        self.camera_controller.reset();
        self.ui.reset_model();

        self.model = Some(model);
        self.controller = Some(controller);
        Ok(())
    }

    pub fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    pub fn shutdown(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.dispose();
        }
        self.model = None;
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        let consumed = EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        };

        match event {
            WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed || event.state != ElementState::Pressed {
                    return consumed;
                }
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
                let command = command_for_key(
                    &event.logical_key,
                    &self.settings.controls.keys,
                    self.egui_wants_keyboard,
                );
                if let (Some(command), Some(controller)) = (command, self.controller.as_mut()) {
                    log::debug!("Key command: {command:?}");
                    controller.apply(command);
                }
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if self.egui_wants_pointer {
                    return consumed;
                }
                self.camera_controller
                    .on_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.camera_controller.on_modifiers(state.shift_key(), state.alt_key());
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.egui_wants_pointer {
                    return consumed;
                }
                self.camera_controller.on_mouse_move((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if self.egui_wants_pointer {
                    return consumed;
                }
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.05,
                };
                self.camera_controller.on_scroll(lines);
            }
            _ => {}
        }

        EventResponse::idle()
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if let Some(controller) = self.controller.as_mut() {
            controller.tick(delta);
            if let Some(mixer) = controller.player_mut() {
                mixer.refresh_world_matrices();
            }
        }

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();
        let view_proj = self
            .camera_controller
            .state()
            .view_proj(self.renderer.aspect(), self.settings.display.far_plane);

        let idle_panel = PanelState::new(self.settings.controls.ids.clone());
        let mut response = UiResponse::default();

        let full_output = egui_ctx.run(raw_input, |ctx| {
            if let Some(mixer) = self.controller.as_ref().and_then(|c| c.player()) {
                paint_overlay(
                    ctx,
                    &view_proj,
                    mixer.bones(),
                    mixer.meshes(),
                    &self.settings.display,
                    &self.settings.colors,
                );
            }

            let (panel, info) = match self.controller.as_ref() {
                Some(c) => (
                    c.controls(),
                    PanelInfo {
                        active_clip: c.active_clip(),
                        is_playing: c.is_playing(),
                        last_notice: c.last_notice(),
                    },
                ),
                None => (
                    &idle_panel,
                    PanelInfo {
                        active_clip: None,
                        is_playing: false,
                        last_notice: None,
                    },
                ),
            };
            response = self
                .ui
                .show(ctx, panel, &info, self.model.as_deref(), &mut self.settings);
        });

        self.egui_wants_pointer = egui_ctx.wants_pointer_input();
        self.egui_wants_keyboard = egui_ctx.wants_keyboard_input();

        if let Some(controller) = self.controller.as_mut() {
            for command in response.commands {
                log::debug!("Panel command: {command:?}");
                controller.apply(command);
            }
        }

        if let Some(name) = response.select_rig {
            if let Err(err) = self.load_rig(name) {
                log::error!("Failed to load rig: {err}");
            }
        }

        if response.reset_camera {
            self.camera_controller.reset();
        }

        self.renderer.clear_color = self.settings.colors.background_color;

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let size = self.window.inner_size();
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [size.width, size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.renderer
            .render(paint_jobs, full_output.textures_delta, screen_descriptor)
    }

    pub fn resize_to_window(&mut self) {
        self.renderer.resize(self.window.inner_size());
    }

    pub fn reconfigure_surface(&mut self) {
        self.renderer.reconfigure();
    }
}
