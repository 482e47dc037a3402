/// Horizontal context margin as a fraction of the frame width.
pub const CONTEXT_WIDTH_FRACTION: f64 = 0.05;

/// Vertical context margin as a fraction of the frame height.
pub const CONTEXT_HEIGHT_FRACTION: f64 = 0.10;

/// Side length of the square input the age model expects.
pub const MODEL_INPUT_SIZE: u32 = 128;

pub const AGE_MODEL_NAME: &str = "age_regression.onnx";
pub const AGE_MODEL_URL: &str =
    "https://github.com/agelens/agelens/releases/download/v0.1.0/age_regression.onnx";

pub const FACE_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const FACE_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

/// Scale step between detection pyramid levels. The SeetaFace engine takes
/// the inverse (a downscaling ratio), so backends pass `1.0 / this`.
pub const DETECTOR_SCALE_FACTOR: f64 = 1.1;

/// Detection score threshold. Fills the false-positive-suppression role a
/// cascade classifier's min-neighbors parameter plays.
pub const DETECTOR_SCORE_THRESH: f64 = 2.0;

/// Smallest face window the detector slides over the frame.
pub const DETECTOR_MIN_FACE_SIZE: u32 = 20;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
