//! Boundary trait for the external inference engine.

use ndarray::{Array2, Array4};

/// Black-box inference call supplied by the caller.
///
/// The pipeline hands the engine a normalized image tensor and gets back the
/// raw per-anchor output layers; everything the network does in between is
/// opaque. Implementations wrap whatever runtime actually executes the model
/// (ONNX Runtime, tract, a remote service, ...).
pub trait InferenceEngine {
    /// Error type for inference failures.
    type Error: std::fmt::Display;

    /// Square input resolution the model expects, in pixels.
    fn input_size(&self) -> u32;

    /// Run the network on an NCHW float tensor of shape
    /// `[1, 3, input_size, input_size]` with values scaled to [0, 1].
    ///
    /// Each returned layer has one row per anchor/cell and
    /// `4 + num_classes` columns: normalized center x/y, width/height, then
    /// one score per class.
    fn infer(&mut self, input: &Array4<f32>) -> Result<Vec<Array2<f32>>, Self::Error>;
}
