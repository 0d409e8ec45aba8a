pub mod canvas;
pub mod renderer;
pub mod scene;

pub use canvas::{Layer, PixelCanvas};
pub use renderer::Renderer;
