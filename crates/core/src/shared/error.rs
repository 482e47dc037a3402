use thiserror::Error;

/// Errors surfaced by the annotation pipeline.
///
/// Per-face failures (`InvalidRegion`, `Inference`) skip only that face;
/// `Detection` downgrades a cycle to zero faces; `Device` ends the
/// streaming session and is recoverable by re-enabling.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("face detection failed: {0}")]
    Detection(String),

    #[error(
        "crop region ({x:.0},{y:.0}) {width:.0}x{height:.0} invalid for {frame_width}x{frame_height} frame"
    )]
    InvalidRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        frame_width: u32,
        frame_height: u32,
    },

    #[error("age inference failed: {0}")]
    Inference(String),

    #[error("capture device error: {0}")]
    Device(String),
}
