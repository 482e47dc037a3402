pub mod constants;
pub mod error;
pub mod face_rect;
pub mod frame;
pub mod model_resolver;
pub mod video_metadata;
