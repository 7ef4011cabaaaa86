//! Class allow-list filtering of suppressed detections.

use std::collections::HashSet;

use crate::pipeline::detection::Detection;

/// Narrow the detection set to the given class names.
///
/// An empty allow-list means no filtering: every detection passes through
/// unchanged. Original order is preserved.
pub fn filter_by_class(detections: Vec<Detection>, allow_list: &HashSet<String>) -> Vec<Detection> {
    if allow_list.is_empty() {
        return detections;
    }
    detections
        .into_iter()
        .filter(|detection| allow_list.contains(&detection.class_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::rect::Rect;

    fn detection(class_id: usize, class_name: &str) -> Detection {
        Detection::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0.8, class_id, class_name)
    }

    #[test]
    fn test_allow_list_applied() {
        let detections = vec![
            detection(3, "motorcycle"),
            detection(2, "car"),
            detection(1, "bicycle"),
        ];
        let allow_list: HashSet<String> = ["motorcycle", "bicycle"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let filtered = filter_by_class(detections, &allow_list);
        let names: Vec<&str> = filtered.iter().map(|d| d.class_name.as_str()).collect();
        assert_eq!(names, vec!["motorcycle", "bicycle"]);
    }

    #[test]
    fn test_empty_allow_list_passes_all() {
        let detections = vec![detection(3, "motorcycle"), detection(2, "car")];
        let filtered = filter_by_class(detections.clone(), &HashSet::new());
        assert_eq!(filtered, detections);
    }
}
