use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Implementations must return rectangles that lie fully within the frame;
/// downstream stages rely on that and do not re-validate. `&mut self`
/// because backends may hold mutable engine state.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>>;
}
