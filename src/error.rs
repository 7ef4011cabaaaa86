//! Error types for the detection pipeline.
//!
//! Initialization failures (`ConfigError`) are fatal and surface before any
//! image is processed. Per-image failures (`DetectError`) are recoverable:
//! batch callers skip the image and continue.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal initialization failure. A detector must not be invoked until
/// construction succeeds.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The class table file could not be read.
    #[error("failed to read class table {path:?}")]
    ClassTableIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The class table contained no class names.
    #[error("class table is empty")]
    EmptyClassTable,
}

/// Per-image detection failure, surfaced to the caller as a hard failure for
/// that image only.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The external inference engine failed.
    #[error("inference failed: {0}")]
    Inference(String),
    /// An output layer does not have the `4 + num_classes` columns the
    /// decoder expects.
    #[error("malformed output layer {layer}: expected {expected} columns, got {got}")]
    MalformedLayer {
        layer: usize,
        expected: usize,
        got: usize,
    },
}
