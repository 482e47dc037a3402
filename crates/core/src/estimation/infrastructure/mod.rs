pub mod onnx_age_estimator;
