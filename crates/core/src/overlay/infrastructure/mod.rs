pub mod box_renderer;
pub mod marker_renderer;
