//! Model-backed detector: preprocessing, inference, and the full
//! decode → NMS → filter pipeline.

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array4;

use crate::error::DetectError;
use crate::pipeline::{
    ClassTable, Detection, DetectionConfig, collect_candidates, filter_by_class,
    suppress_per_class,
};

use super::{Detector, InferenceEngine};

/// Detector backed by a trained network behind an [`InferenceEngine`].
///
/// The class table and configuration are fixed at construction; the pipeline
/// itself is stateless, so the same detector can be reused across images.
pub struct ModelDetector<E: InferenceEngine> {
    engine: E,
    classes: ClassTable,
    config: DetectionConfig,
}

impl<E: InferenceEngine> ModelDetector<E> {
    pub fn new(engine: E, classes: ClassTable, config: DetectionConfig) -> Self {
        Self {
            engine,
            classes,
            config,
        }
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Resize to the engine's square input and build an NCHW float tensor
    /// scaled to [0, 1].
    fn preprocess(&self, image: &RgbImage) -> Array4<f32> {
        let size = self.engine.input_size();
        let resized = imageops::resize(image, size, size, FilterType::Triangle);

        let size = size as usize;
        let mut tensor = Array4::<f32>::zeros((1, 3, size, size));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, channel, y as usize, x as usize]] = pixel.0[channel] as f32 / 255.0;
            }
        }
        tensor
    }
}

impl<E: InferenceEngine> Detector for ModelDetector<E> {
    type Error = DetectError;

    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>, DetectError> {
        let (image_width, image_height) = image.dimensions();

        let input = self.preprocess(image);
        let layers = self
            .engine
            .infer(&input)
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let candidates = collect_candidates(
            &layers,
            image_width,
            image_height,
            &self.classes,
            self.config.confidence_threshold,
        )?;

        let keep = suppress_per_class(
            candidates.boxes(),
            candidates.confidences(),
            candidates.class_ids(),
            self.config.nms_iou_threshold,
        );
        let survivors = candidates.select(&keep);

        Ok(filter_by_class(survivors, &self.config.target_classes))
    }
}
