//! Core library for face detection and age annotation.
//!
//! The pipeline turns captured frames into annotated output: detected face
//! rectangles are expanded with surrounding context, cropped and normalized
//! for an age-regression model, and the predicted ages are composed into
//! overlay annotations. Detection, inference, capture, and rendering sit
//! behind trait seams so backends stay swappable.

pub mod capture;
pub mod detection;
pub mod estimation;
pub mod overlay;
pub mod pipeline;
pub mod shared;
