pub mod annotation;
pub mod overlay_renderer;
