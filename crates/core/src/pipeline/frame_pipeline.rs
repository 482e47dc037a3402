use crate::detection::domain::context_margin::ContextMargin;
use crate::detection::domain::face_detector::FaceDetector;
use crate::estimation::domain::age_estimator::AgeEstimator;
use crate::estimation::domain::face_preprocessor::crop_and_normalize;
use crate::overlay::domain::annotation::Annotation;
use crate::shared::error::AnnotateError;
use crate::shared::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Runs one frame through detect → expand → crop → infer → compose.
///
/// This is the single annotation pipeline every driver shares — the batch
/// use cases and the live stream session differ only in where frames come
/// from and how cycles are paced.
///
/// Failure containment:
/// - a detector error downgrades the cycle to zero faces (logged);
/// - a per-face failure (invalid crop region, inference error) skips that
///   face and keeps the rest of the frame's faces.
pub fn annotate_frame(
    frame: &Frame,
    detector: &mut dyn FaceDetector,
    estimator: &mut dyn AgeEstimator,
) -> Vec<Annotation> {
    let faces = match detector.detect(frame) {
        Ok(faces) => faces,
        Err(e) => {
            log::warn!("{}", AnnotateError::Detection(e.to_string()));
            return Vec::new();
        }
    };

    let margin = ContextMargin::for_frame(frame.width(), frame.height());

    let mut annotations = Vec::with_capacity(faces.len());
    for face in &faces {
        match annotate_face(frame, &margin, face, estimator) {
            Ok(annotation) => annotations.push(annotation),
            Err(e) => log::warn!("skipping face in frame {}: {e}", frame.index()),
        }
    }
    annotations
}

fn annotate_face(
    frame: &Frame,
    margin: &ContextMargin,
    face: &FaceRect,
    estimator: &mut dyn AgeEstimator,
) -> Result<Annotation, AnnotateError> {
    let crop_region = margin.expand(face, frame.width(), frame.height());
    let input = crop_and_normalize(frame, &crop_region)?;
    let age = estimator
        .predict(&input)
        .map_err(|e| AnnotateError::Inference(e.to_string()))?;
    Ok(Annotation::compose(face, age))
}
