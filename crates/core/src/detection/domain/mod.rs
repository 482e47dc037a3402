pub mod context_margin;
pub mod face_detector;
