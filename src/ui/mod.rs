pub mod controls;
pub mod input;
pub mod panel;
pub mod ui;
pub mod viewport;

pub use controls::{ControlSurface, PanelState, PlayIcon};
pub use panel::PanelInfo;
pub use ui::{Ui, UiResponse};
