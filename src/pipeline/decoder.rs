//! Geometry & score decoding of raw network output.
//!
//! Each output layer is an `Array2<f32>` with one row per anchor/cell and
//! `4 + num_classes` columns: normalized center x/y and width/height followed
//! by one score per known class.

use ndarray::Array2;

use crate::error::DetectError;
use crate::pipeline::classes::ClassTable;
use crate::pipeline::detection::Detection;
use crate::pipeline::rect::Rect;

/// One anchor/cell output row, borrowed from a raw output layer.
#[derive(Debug, Clone, Copy)]
pub struct RawDetectionRecord<'a> {
    /// Box center x, normalized to [0, 1] of image width.
    pub center_x: f32,
    /// Box center y, normalized to [0, 1] of image height.
    pub center_y: f32,
    /// Box width, normalized to [0, 1] of image width.
    pub width: f32,
    /// Box height, normalized to [0, 1] of image height.
    pub height: f32,
    /// Per-class probabilities, index = class id.
    pub class_scores: &'a [f32],
}

impl<'a> RawDetectionRecord<'a> {
    /// Split a raw row into geometry and scores. Rows shorter than five
    /// values carry no class score and are rejected.
    pub fn from_row(row: &'a [f32]) -> Option<Self> {
        if row.len() < 5 {
            return None;
        }
        Some(Self {
            center_x: row[0],
            center_y: row[1],
            width: row[2],
            height: row[3],
            class_scores: &row[4..],
        })
    }

    /// Index and value of the best class score. Ties resolve to the lowest
    /// class id so the result is deterministic.
    pub fn best_class(&self) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (id, &score) in self.class_scores.iter().enumerate() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((id, score)),
            }
        }
        best
    }
}

/// Decode one raw record into a detection candidate.
///
/// Returns `None` when the best class score falls below
/// `confidence_threshold` (the boundary itself is kept). Box coordinates are
/// converted from the network's normalized center encoding to absolute
/// pixels; no clamping to image bounds happens here.
pub fn decode_record(
    record: &RawDetectionRecord<'_>,
    image_width: u32,
    image_height: u32,
    classes: &ClassTable,
    confidence_threshold: f32,
) -> Option<Detection> {
    let (class_id, confidence) = record.best_class()?;
    if confidence < confidence_threshold {
        return None;
    }

    let w = record.width * image_width as f32;
    let h = record.height * image_height as f32;
    let cx = record.center_x * image_width as f32;
    let cy = record.center_y * image_height as f32;

    let class_name = classes.name_or_fallback(class_id);
    Some(Detection::new(
        Rect::from_center(cx, cy, w, h),
        confidence,
        class_id,
        class_name,
    ))
}

/// Accepted candidates held as aligned sequences, in insertion order, ready
/// for NMS consumption. No dedup happens here.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    boxes: Vec<Rect>,
    confidences: Vec<f32>,
    class_ids: Vec<usize>,
    class_names: Vec<String>,
}

impl CandidateSet {
    pub fn push(&mut self, detection: Detection) {
        self.boxes.push(detection.bbox);
        self.confidences.push(detection.confidence);
        self.class_ids.push(detection.class_id);
        self.class_names.push(detection.class_name);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn boxes(&self) -> &[Rect] {
        &self.boxes
    }

    pub fn confidences(&self) -> &[f32] {
        &self.confidences
    }

    pub fn class_ids(&self) -> &[usize] {
        &self.class_ids
    }

    /// Rebuild the detections at the given indices, preserving index order.
    pub fn select(&self, indices: &[usize]) -> Vec<Detection> {
        indices
            .iter()
            .map(|&i| {
                Detection::new(
                    self.boxes[i],
                    self.confidences[i],
                    self.class_ids[i],
                    self.class_names[i].clone(),
                )
            })
            .collect()
    }
}

/// Run the decoder over every row of every output layer, accumulating
/// accepted candidates in insertion order.
///
/// A layer whose column count does not match `4 + num_classes` is malformed
/// input and fails the whole image. Empty input yields an empty set, not an
/// error.
pub fn collect_candidates(
    layers: &[Array2<f32>],
    image_width: u32,
    image_height: u32,
    classes: &ClassTable,
    confidence_threshold: f32,
) -> Result<CandidateSet, DetectError> {
    let expected = 4 + classes.len();
    let mut candidates = CandidateSet::default();
    let mut scratch = Vec::new();

    for (layer_idx, layer) in layers.iter().enumerate() {
        if layer.ncols() != expected {
            return Err(DetectError::MalformedLayer {
                layer: layer_idx,
                expected,
                got: layer.ncols(),
            });
        }

        for row in layer.rows() {
            let values: &[f32] = match row.as_slice() {
                Some(slice) => slice,
                None => {
                    // Non-standard layout; copy the row out.
                    scratch.clear();
                    scratch.extend(row.iter());
                    &scratch
                }
            };
            let record = match RawDetectionRecord::from_row(values) {
                Some(record) => record,
                None => continue,
            };
            if let Some(detection) = decode_record(
                &record,
                image_width,
                image_height,
                classes,
                confidence_threshold,
            ) {
                candidates.push(detection);
            }
        }
    }

    Ok(candidates)
}
