//! Classical contour-based fallback detector.
//!
//! Used only when no trained model is available. Produces coarse
//! vehicle-shaped candidates from edge geometry with a fixed low confidence;
//! callers must treat the output as lower quality than model detections and
//! never mix the two.

use std::convert::Infallible;

use image::RgbImage;
use imageproc::contours::{BorderType, find_contours};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::point::Point;

use crate::pipeline::{Detection, FALLBACK_CLASS_NAME, Rect};

use super::Detector;

/// Fixed confidence assigned to every contour detection.
pub const CONTOUR_CONFIDENCE: f32 = 0.7;

/// Accepted contour area band, in px².
const MIN_AREA: f32 = 1000.0;
const MAX_AREA: f32 = 50_000.0;
/// Accepted width/height ratio band for a vehicle silhouette.
const MIN_ASPECT: f32 = 0.8;
const MAX_ASPECT: f32 = 3.0;

/// Canny hysteresis thresholds.
const CANNY_LOW: f32 = 50.0;
const CANNY_HIGH: f32 = 150.0;
/// Blur sigma equivalent to a 5x5 Gaussian kernel.
const BLUR_SIGMA: f32 = 1.1;

/// Heuristic edge/contour detector for vehicle-shaped regions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourDetector;

impl ContourDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for ContourDetector {
    type Error = Infallible;

    fn detect(&mut self, image: &RgbImage) -> Result<Vec<Detection>, Infallible> {
        let gray = image::imageops::grayscale(image);
        let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
        let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);

        let mut detections = Vec::new();
        for contour in find_contours::<i32>(&edges) {
            // Top-level external contours only; an outer border nested inside
            // another shape's hole is not a candidate.
            if contour.border_type != BorderType::Outer || contour.parent.is_some() {
                continue;
            }
            let Some(bbox) = bounding_rect(&contour.points) else {
                continue;
            };
            let area = polygon_area(&contour.points);
            if !plausible_vehicle(area, bbox.width, bbox.height) {
                continue;
            }
            detections.push(Detection::new(
                bbox,
                CONTOUR_CONFIDENCE,
                0,
                FALLBACK_CLASS_NAME,
            ));
        }

        log::debug!("contour fallback produced {} detections", detections.len());
        Ok(detections)
    }
}

/// Area/aspect heuristic for a vehicle silhouette.
fn plausible_vehicle(area: f32, width: f32, height: f32) -> bool {
    if height <= 0.0 {
        return false;
    }
    let aspect = width / height;
    (MIN_AREA..=MAX_AREA).contains(&area) && (MIN_ASPECT..=MAX_ASPECT).contains(&aspect)
}

/// Enclosing axis-aligned rectangle of a contour. `None` for empty contours.
fn bounding_rect(points: &[Point<i32>]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y) = (first.x, first.y);
    let (mut max_x, mut max_y) = (first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect::new(
        min_x as f32,
        min_y as f32,
        (max_x - min_x + 1) as f32,
        (max_y - min_y + 1) as f32,
    ))
}

/// Shoelace area of the polygon traced by the contour points.
fn polygon_area(points: &[Point<i32>]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        doubled += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (doubled.abs() as f32) / 2.0
}
