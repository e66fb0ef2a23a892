pub mod animation;
pub mod app;
pub mod error;
pub mod model;
pub mod playback;
pub mod renderer;
pub mod settings;
pub mod ui;

/// Application name under which settings are stored
pub const CONFY_APP_NAME: &str = "anatomy-viewer";
