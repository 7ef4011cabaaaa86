//! Vehicle detection post-processing pipeline.
//!
//! Turns a neural network's raw per-cell, per-anchor output into a
//! de-duplicated set of labeled bounding boxes:
//! decode → collect → non-maximum suppression → class filter. A classical
//! contour-based detector serves as a fallback when no trained model is
//! available, and an [`Annotator`] can draw the results for inspection.
//!
//! The inference call itself is a black box behind [`InferenceEngine`];
//! this crate performs no model execution and no I/O beyond loading the
//! class table.

pub mod annotate;
pub mod detector;
pub mod error;
pub mod pipeline;

pub use crate::annotate::Annotator;
pub use crate::detector::{
    BatchSummary, ContourDetector, DetectionRunner, Detector, ImageReport, InferenceEngine,
    ModelDetector,
};
pub use crate::error::{ConfigError, DetectError};
pub use crate::pipeline::{ClassTable, Detection, DetectionConfig, Rect};
