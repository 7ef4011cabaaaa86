//! Trait implemented by every detector variant.

use image::RgbImage;

use crate::pipeline::Detection;

/// A detector turns one image frame into a list of labeled detections.
///
/// The two shipped implementations — [`ModelDetector`](super::ModelDetector)
/// backed by a trained network and the classical
/// [`ContourDetector`](super::ContourDetector) fallback — are selected once
/// at startup. Their outputs are of different quality and must never be
/// mixed in the same result set; holding exactly one `Detector` per runner
/// enforces that by construction.
///
/// # Example
///
/// ```ignore
/// use motoscan_rs::{Detection, Detector};
///
/// struct MyDetector;
///
/// impl Detector for MyDetector {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, image: &image::RgbImage) -> Result<Vec<Detection>, Self::Error> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Detector {
    /// Error type for per-image detection failures.
    type Error;

    /// Produce detections for one image frame.
    ///
    /// An image with nothing in it is `Ok(vec![])`, not an error.
    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>, Self::Error>;
}
