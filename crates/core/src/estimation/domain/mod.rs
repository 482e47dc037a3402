pub mod age_estimator;
pub mod face_preprocessor;
