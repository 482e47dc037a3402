use std::path::Path;

use ndarray::Array4;

use crate::estimation::domain::age_estimator::AgeEstimator;
use crate::shared::constants::MODEL_INPUT_SIZE;

/// Age regressor backed by an ONNX Runtime session.
///
/// Expects an NHWC `[1, H, W, 3]` float input and a single-value output;
/// the input resolution is read from the model when it is static, with a
/// fallback to the pipeline's 128 default.
pub struct OnnxAgeEstimator {
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxAgeEstimator {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let session = ort::session::Session::builder()?.commit_from_file(model_path)?;

        // NHWC: [1, H, W, 3] — use H when the model declares it
        let input_size = session
            .inputs()
            .first()
            .and_then(|input| {
                if let ort::value::ValueType::Tensor { ref shape, .. } = input.dtype() {
                    if shape.len() >= 3 && shape[1] > 0 {
                        Some(shape[1] as u32)
                    } else {
                        None
                    }
                } else {
                    None
                }
            })
            .unwrap_or(MODEL_INPUT_SIZE);

        Ok(Self {
            session,
            input_size,
        })
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }
}

impl AgeEstimator for OnnxAgeEstimator {
    fn predict(&mut self, input: &Array4<f32>) -> Result<f32, Box<dyn std::error::Error>> {
        let input_value = ort::value::Tensor::from_array(input.clone())?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("age model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let age = tensor
            .iter()
            .next()
            .copied()
            .ok_or("age model produced an empty output tensor")?;
        Ok(age)
    }
}
