use crate::shared::face_rect::FaceRect;

/// One face's visible annotation for a single frame cycle.
///
/// `display_box` is the original, unexpanded detection rectangle — the
/// context margin exists for model input only and is never shown.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub display_box: FaceRect,
    pub label: String,
}

impl Annotation {
    /// Composes the overlay for a face from the model's age prediction.
    ///
    /// The label is the age formatted to exactly two decimal places behind
    /// a fixed prefix, e.g. `"Age: 34.00"`.
    pub fn compose(face: &FaceRect, age: f32) -> Annotation {
        Annotation {
            display_box: *face,
            label: format!("Age: {age:.2}"),
        }
    }
}
