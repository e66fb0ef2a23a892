use anatomy_viewer::app::AppHandler;
use anatomy_viewer::error::ViewerError;
use anatomy_viewer::model::demo;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let rig = std::env::args().nth(1).unwrap_or_else(|| "ankle".to_string());
    if !demo::RIG_NAMES.contains(&rig.as_str()) {
        let err = ViewerError::new("unknown-rig")
            .with_arg("name", &rig)
            .with_arg("available", demo::RIG_NAMES.join(","));
        return Err(err.into());
    }

    let event_loop = EventLoop::new().map_err(ViewerError::from)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new(rig, tokio::runtime::Runtime::new()?);
    event_loop.run_app(&mut handler).map_err(ViewerError::from)?;

    Ok(())
}
