use ndarray::Array4;

/// Domain interface for age regression.
///
/// Input is the preprocessed `[1, 128, 128, 3]` tensor with values in
/// `[0, 1]`; output is a single unbounded age value that callers format
/// for display.
pub trait AgeEstimator: Send {
    fn predict(&mut self, input: &Array4<f32>) -> Result<f32, Box<dyn std::error::Error>>;
}
