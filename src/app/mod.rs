pub mod app;
pub mod handler;

pub use app::App;
pub use handler::AppHandler;
