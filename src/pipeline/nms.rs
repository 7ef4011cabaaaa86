//! Non-maximum suppression over aligned candidate sequences.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::pipeline::rect::Rect;

/// Greedy NMS over aligned boxes and confidences.
///
/// Candidates are visited in descending confidence; ties keep insertion
/// order (stable sort), so identical input always yields the same kept set.
/// The highest-remaining candidate is kept and every remaining candidate
/// whose IoU with it reaches `iou_threshold` is discarded.
///
/// Suppression is not classwise here; callers wanting per-class suppression
/// partition first (see [`suppress_per_class`]).
///
/// Returns the kept indices into the input, in descending confidence order.
pub fn suppress(boxes: &[Rect], confidences: &[f32], iou_threshold: f32) -> Vec<usize> {
    debug_assert_eq!(boxes.len(), confidences.len());

    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        confidences[b]
            .partial_cmp(&confidences[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; boxes.len()];
    for (rank, &idx) in order.iter().enumerate() {
        if suppressed[idx] {
            continue;
        }
        keep.push(idx);
        for &other in &order[rank + 1..] {
            if !suppressed[other] && boxes[idx].iou(&boxes[other]) >= iou_threshold {
                suppressed[other] = true;
            }
        }
    }
    keep
}

/// Per-class NMS: partition candidates by class id, suppress each partition
/// independently, and merge the kept indices.
///
/// Returns the kept indices in ascending (insertion) order.
pub fn suppress_per_class(
    boxes: &[Rect],
    confidences: &[f32],
    class_ids: &[usize],
    iou_threshold: f32,
) -> Vec<usize> {
    debug_assert_eq!(boxes.len(), class_ids.len());

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for (idx, &class_id) in class_ids.iter().enumerate() {
        groups.entry(class_id).or_default().push(idx);
    }

    let mut keep = Vec::new();
    for group in groups.values() {
        let group_boxes: Vec<Rect> = group.iter().map(|&i| boxes[i]).collect();
        let group_confidences: Vec<f32> = group.iter().map(|&i| confidences[i]).collect();
        for kept in suppress(&group_boxes, &group_confidences, iou_threshold) {
            keep.push(group[kept]);
        }
    }
    keep.sort_unstable();
    keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppression_scenario() {
        // A (0.9) overlaps B (0.8) with IoU ~0.68; C (0.7) is far away.
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(1.0, 1.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
        ];
        let confidences = vec![0.9, 0.8, 0.7];

        let keep = suppress(&boxes, &confidences, 0.4);
        assert_eq!(keep, vec![0, 2]);
    }

    #[test]
    fn test_single_candidate_kept() {
        let boxes = vec![Rect::new(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(suppress(&boxes, &[0.6], 0.4), vec![0]);
    }

    #[test]
    fn test_all_overlapping_keeps_top() {
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.5, 0.5, 10.0, 10.0),
            Rect::new(1.0, 1.0, 10.0, 10.0),
        ];
        let confidences = vec![0.6, 0.9, 0.7];
        assert_eq!(suppress(&boxes, &confidences, 0.4), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(suppress(&[], &[], 0.4).is_empty());
    }

    #[test]
    fn test_tie_break_is_insertion_order() {
        // Identical confidence, mutually overlapping: the first-seen wins.
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(1.0, 1.0, 10.0, 10.0),
        ];
        let confidences = vec![0.8, 0.8];
        assert_eq!(suppress(&boxes, &confidences, 0.4), vec![0]);
    }

    #[test]
    fn test_determinism() {
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(2.0, 2.0, 10.0, 10.0),
            Rect::new(4.0, 4.0, 10.0, 10.0),
            Rect::new(40.0, 40.0, 10.0, 10.0),
        ];
        let confidences = vec![0.7, 0.7, 0.9, 0.7];
        let first = suppress(&boxes, &confidences, 0.4);
        for _ in 0..10 {
            assert_eq!(suppress(&boxes, &confidences, 0.4), first);
        }
    }

    #[test]
    fn test_idempotence() {
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(1.0, 1.0, 10.0, 10.0),
            Rect::new(50.0, 50.0, 10.0, 10.0),
            Rect::new(52.0, 52.0, 10.0, 10.0),
        ];
        let confidences = vec![0.9, 0.8, 0.7, 0.95];

        let keep = suppress(&boxes, &confidences, 0.4);
        let kept_boxes: Vec<Rect> = keep.iter().map(|&i| boxes[i]).collect();
        let kept_confidences: Vec<f32> = keep.iter().map(|&i| confidences[i]).collect();

        // A second pass over the survivors suppresses nothing further.
        let again = suppress(&kept_boxes, &kept_confidences, 0.4);
        assert_eq!(again.len(), keep.len());
    }

    #[test]
    fn test_zero_area_boxes_inert() {
        let boxes = vec![
            Rect::new(5.0, 5.0, 0.0, 0.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ];
        let confidences = vec![0.9, 0.8];
        // The zero-area box neither suppresses the real box nor is suppressed
        // by it.
        let keep = suppress(&boxes, &confidences, 0.4);
        assert_eq!(keep, vec![0, 1]);
    }

    #[test]
    fn test_per_class_keeps_cross_class_overlap() {
        let boxes = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(1.0, 1.0, 10.0, 10.0), // overlaps, different class
            Rect::new(2.0, 2.0, 10.0, 10.0), // overlaps, same class as first
        ];
        let confidences = vec![0.9, 0.8, 0.7];
        let class_ids = vec![3, 1, 3];

        let keep = suppress_per_class(&boxes, &confidences, &class_ids, 0.4);
        assert_eq!(keep, vec![0, 1]);
    }
}
