use crate::app::app::App;
use crate::error::ViewerError;
use crate::settings::Settings;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub rig: String,
    pub runtime: Runtime,
}

impl AppHandler {
    pub fn new(rig: String, runtime: Runtime) -> Self {
        Self {
            app: None,
            rig,
            runtime,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<App, ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title("Anatomy Viewer")
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.runtime
            .block_on(App::new(window, Settings::load()))
            .map_err(|err| ViewerError::new("renderer-init-failed").push_viewer(err))
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let mut app = match self.start(event_loop) {
            Ok(app) => app,
            Err(err) => {
                log::error!("Failed to start viewer: {err} {:?}", err.causes);
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = app.load_rig(&self.rig) {
            log::error!("Failed to load rig '{}': {err}", self.rig);
        }

        self.app = Some(app);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(app) = &mut self.app else {
            return;
        };

        let response = app.handle_event(&event);
        if response.repaint {
            app.window.request_redraw();
        }
        if response.exit {
            app.shutdown();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let Some(app) = &mut self.app else {
            return;
        };

        match app.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost, reconfiguring");
                app.resize_to_window();
                app.reconfigure_surface();
            }
            Err(err) => log::error!("Render error: {err:?}"),
        }
        app.window.request_redraw();
    }
}
