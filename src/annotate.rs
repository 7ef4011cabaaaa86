//! Drawing detections onto a copy of the source image.

use std::io::Cursor;

use ab_glyph::{FontArc, PxScale};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PixelRect;

use crate::pipeline::Detection;

/// Per-class box colors, cycled by class id.
const PALETTE: [[u8; 3]; 8] = [
    [0, 255, 0],
    [255, 64, 64],
    [255, 161, 54],
    [50, 170, 255],
    [170, 255, 50],
    [255, 50, 255],
    [50, 255, 255],
    [255, 221, 51],
];

/// Draws boxes and label strips for visual inspection.
///
/// Pure side output: the source image is never mutated and failures such as
/// boxes outside the frame are tolerated by clipping, never raised.
#[derive(Debug, Clone)]
pub struct Annotator {
    font: Option<FontArc>,
    label_height: u32,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator {
    pub fn new() -> Self {
        Self {
            font: None,
            label_height: 16,
        }
    }

    /// Supply a font for label text. Without one, boxes and label strips are
    /// still drawn but no text is rendered.
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_label_height(mut self, label_height: u32) -> Self {
        self.label_height = label_height.max(8);
        self
    }

    /// Return a copy of `image` with every detection outlined and labeled
    /// `"{class_name}: {confidence as percentage}"`.
    pub fn annotate(&self, image: &RgbImage, detections: &[Detection]) -> RgbImage {
        let mut out = image.clone();
        if out.width() == 0 || out.height() == 0 {
            // Nothing to draw on; tolerated like any other clipped-away box.
            return out;
        }
        let (img_w, img_h) = (out.width() as i64, out.height() as i64);

        for detection in detections {
            let color = class_color(detection.class_id);

            // Truncate to pixels and clip to the frame; a box fully outside
            // simply draws nothing.
            let x0 = (detection.bbox.x as i64).clamp(0, img_w - 1);
            let y0 = (detection.bbox.y as i64).clamp(0, img_h - 1);
            let x1 = (detection.bbox.right() as i64).clamp(0, img_w - 1);
            let y1 = (detection.bbox.bottom() as i64).clamp(0, img_h - 1);
            if x1 <= x0 || y1 <= y0 {
                continue;
            }
            let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);

            draw_hollow_rect_mut(
                &mut out,
                PixelRect::at(x0 as i32, y0 as i32).of_size(w, h),
                color,
            );

            let strip_h = self.label_height.min(h);
            let strip_y = (y0 - strip_h as i64).max(0);
            // of_size requires positive dimensions.
            debug_assert!(strip_h > 0);
            draw_filled_rect_mut(
                &mut out,
                PixelRect::at(x0 as i32, strip_y as i32).of_size(w, strip_h),
                darken(color),
            );

            if let Some(font) = &self.font {
                let label = format!(
                    "{}: {:.2}%",
                    detection.class_name,
                    detection.confidence * 100.0
                );
                let scale = PxScale::from(strip_h as f32 - 2.0);
                draw_text_mut(
                    &mut out,
                    Rgb([255, 255, 255]),
                    x0 as i32,
                    strip_y as i32,
                    scale,
                    font,
                    &label,
                );
            }
        }

        out
    }

    /// Encode an annotated image as a JPEG byte buffer.
    pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Jpeg)?;
        Ok(buffer.into_inner())
    }
}

fn class_color(class_id: usize) -> Rgb<u8> {
    Rgb(PALETTE[class_id % PALETTE.len()])
}

fn darken(color: Rgb<u8>) -> Rgb<u8> {
    Rgb([
        (color.0[0] as u16 * 2 / 3) as u8,
        (color.0[1] as u16 * 2 / 3) as u8,
        (color.0[2] as u16 * 2 / 3) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Rect;

    fn detection(bbox: Rect) -> Detection {
        Detection::new(bbox, 0.85, 3, "motorcycle")
    }

    #[test]
    fn test_source_image_untouched() {
        let image = RgbImage::new(64, 64);
        let before = image.clone();
        let annotated =
            Annotator::new().annotate(&image, &[detection(Rect::new(10.0, 20.0, 30.0, 20.0))]);

        assert_eq!(image, before);
        assert_eq!(annotated.dimensions(), image.dimensions());
        // The box outline actually landed on the copy.
        assert_ne!(annotated, image);
        assert_eq!(annotated.get_pixel(15, 20), &Rgb([50, 170, 255]));
    }

    #[test]
    fn test_out_of_frame_box_is_clipped() {
        let image = RgbImage::new(64, 64);
        let partly_outside = detection(Rect::new(-10.0, -10.0, 30.0, 30.0));
        let fully_outside = detection(Rect::new(100.0, 100.0, 30.0, 30.0));

        let annotated = Annotator::new().annotate(&image, &[partly_outside, fully_outside]);
        assert_eq!(annotated.dimensions(), image.dimensions());
    }

    #[test]
    fn test_zero_size_image_tolerated() {
        let empty = RgbImage::new(0, 0);
        let annotated =
            Annotator::new().annotate(&empty, &[detection(Rect::new(0.0, 0.0, 10.0, 10.0))]);
        assert_eq!(annotated.dimensions(), (0, 0));
    }

    #[test]
    fn test_encode_jpeg() {
        let image = RgbImage::new(32, 32);
        let bytes = Annotator::encode_jpeg(&image).unwrap();
        assert!(!bytes.is_empty());
        // JPEG SOI marker.
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }
}
