pub mod animation;
pub mod demo;
pub mod mesh;
pub mod model;
pub mod skeleton;

pub use animation::*;
pub use mesh::*;
pub use model::Model;
pub use skeleton::*;
