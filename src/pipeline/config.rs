//! Pipeline configuration.

use std::collections::HashSet;

/// Configuration for the detection post-processing pipeline.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Candidates scoring below this are discarded before NMS. The boundary
    /// is inclusive: a score exactly at the threshold is kept.
    pub confidence_threshold: f32,
    /// Candidates of the same class overlapping a kept detection with IoU at
    /// or above this value are suppressed.
    pub nms_iou_threshold: f32,
    /// Optional allow-list of class names for the final filter stage.
    /// Empty = no filtering.
    pub target_classes: HashSet<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            nms_iou_threshold: 0.4,
            target_classes: HashSet::new(),
        }
    }
}

impl DetectionConfig {
    /// Restrict the final detection set to the given class names.
    pub fn with_target_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_classes = classes.into_iter().map(Into::into).collect();
        self
    }
}
