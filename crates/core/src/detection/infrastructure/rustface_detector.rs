use std::path::Path;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::constants::{
    DETECTOR_MIN_FACE_SIZE, DETECTOR_SCALE_FACTOR, DETECTOR_SCORE_THRESH,
};
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// Converts the frame to grayscale in front of the engine and clamps the
/// returned boxes to the frame, upholding the [`FaceDetector`] contract
/// that detections lie fully inside the frame.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(model_path)?;
        let model = rustface::read_model(std::io::BufReader::new(file))?;
        Ok(Self { model })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>> {
        let gray = frame.to_grayscale();
        let width = frame.width();
        let height = frame.height();

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(DETECTOR_MIN_FACE_SIZE);
        detector.set_score_thresh(DETECTOR_SCORE_THRESH);
        detector.set_pyramid_scale_factor((1.0 / DETECTOR_SCALE_FACTOR) as f32);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(&gray, width, height));

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceRect::new(
                    bbox.x() as f64,
                    bbox.y() as f64,
                    bbox.width() as f64,
                    bbox.height() as f64,
                )
                .clamp_to(width, height)
            })
            .filter(|rect| rect.width > 0.0 && rect.height > 0.0)
            .collect())
    }
}
