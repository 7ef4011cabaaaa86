//! Batch runner combining a detector with optional annotation.

use std::fmt::Display;

use image::RgbImage;

use crate::annotate::Annotator;
use crate::pipeline::Detection;

use super::Detector;

/// Result for one successfully processed image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    /// Caller-supplied source image identifier.
    pub image_id: String,
    pub detections: Vec<Detection>,
    /// Present when the runner was given an [`Annotator`].
    pub annotated: Option<RgbImage>,
}

/// Success/failure tally for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub total_detections: usize,
}

/// Runs a single detector over many images, continuing past per-image
/// failures.
///
/// Holds exactly one [`Detector`] variant, chosen at startup, so model-based
/// and fallback detections can never end up in the same result set.
pub struct DetectionRunner<D: Detector> {
    detector: D,
    annotator: Option<Annotator>,
}

impl<D: Detector> DetectionRunner<D>
where
    D::Error: Display,
{
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            annotator: None,
        }
    }

    /// Also produce an annotated copy of each processed image.
    pub fn with_annotator(mut self, annotator: Annotator) -> Self {
        self.annotator = Some(annotator);
        self
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Process a single image.
    pub fn process_image(
        &mut self,
        image_id: &str,
        image: &RgbImage,
    ) -> Result<ImageReport, D::Error> {
        let detections = self.detector.detect(image)?;
        let annotated = self
            .annotator
            .as_ref()
            .map(|annotator| annotator.annotate(image, &detections));
        Ok(ImageReport {
            image_id: image_id.to_owned(),
            detections,
            annotated,
        })
    }

    /// Process a stream of labeled images.
    ///
    /// Images are consumed one at a time, so the batch never needs to be
    /// resident in memory as a whole. A failing image is logged, counted in
    /// the summary, and skipped; the run never aborts.
    pub fn process_batch<I>(&mut self, images: I) -> (Vec<ImageReport>, BatchSummary)
    where
        I: IntoIterator<Item = (String, RgbImage)>,
    {
        let mut reports = Vec::new();
        let mut summary = BatchSummary::default();

        for (image_id, image) in images {
            match self.process_image(&image_id, &image) {
                Ok(report) => {
                    summary.processed += 1;
                    summary.total_detections += report.detections.len();
                    reports.push(report);
                }
                Err(e) => {
                    summary.failed += 1;
                    log::warn!("detection failed for {}: {}", image_id, e);
                }
            }
        }

        log::info!(
            "batch complete: {} processed, {} failed, {} detections",
            summary.processed,
            summary.failed,
            summary.total_detections
        );
        (reports, summary)
    }
}
