//! Detection value type handed to downstream consumers.

use crate::pipeline::rect::Rect;

/// A labeled detection produced by a detector.
///
/// Every detection that survives the full pipeline satisfies
/// `confidence >= confidence_threshold`, and no two survivors of the same
/// class overlap with IoU at or above the suppression threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in pixel units (may extend past the image frame).
    pub bbox: Rect,
    /// Confidence score in [0, 1].
    pub confidence: f32,
    /// Index into the class table this detection was decoded against.
    pub class_id: usize,
    /// Resolved class name.
    pub class_name: String,
}

impl Detection {
    pub fn new(bbox: Rect, confidence: f32, class_id: usize, class_name: impl Into<String>) -> Self {
        Self {
            bbox,
            confidence,
            class_id,
            class_name: class_name.into(),
        }
    }
}
