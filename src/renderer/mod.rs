pub mod camera;
pub mod renderer;

pub use renderer::Renderer;
