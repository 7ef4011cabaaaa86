//! Detector variants and the batch runner.
//!
//! This module provides the polymorphic [`Detector`] capability with its two
//! implementations — the model-backed [`ModelDetector`] and the classical
//! [`ContourDetector`] fallback — plus the [`InferenceEngine`] boundary trait
//! for plugging in an actual inference runtime.

mod contour;
mod engine;
mod model;
mod runner;
mod source;

pub use contour::{CONTOUR_CONFIDENCE, ContourDetector};
pub use engine::InferenceEngine;
pub use model::ModelDetector;
pub use runner::{BatchSummary, DetectionRunner, ImageReport};
pub use source::Detector;
