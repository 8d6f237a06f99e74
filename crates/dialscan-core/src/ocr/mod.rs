//! OCR capability consumed by the extraction pipeline.
//!
//! The pipeline only needs "image in, text out". [`TextRecognizer`] is that
//! seam; [`PureOcrEngine`] implements it with PaddleOCR models run by
//! `pure-onnx-ocr`, and browser or test callers can plug in their own.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// A recognized text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle as (min_x, min_y, max_x, max_y).
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Dimensions (width, height) of the image the box coordinates refer to.
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Build a result from boxes, sorting them into reading order and
    /// joining their text line by line.
    pub fn from_boxes(mut boxes: Vec<TextBox>, image_size: (u32, u32), row_tolerance: f32) -> Self {
        sort_by_reading_order(&mut boxes, row_tolerance);

        let text = boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            boxes,
            text,
            processing_time_ms: 0,
            image_size,
        }
    }

    /// True when no text was recognized.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Sort boxes top-to-bottom, then left-to-right within a row.
///
/// Boxes whose top edges fall in the same `row_tolerance` band share a row.
pub fn sort_by_reading_order(boxes: &mut [TextBox], row_tolerance: f32) {
    let tolerance = if row_tolerance > 0.0 { row_tolerance } else { 1.0 };

    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        let row_a = (ay / tolerance) as i32;
        let row_b = (by / tolerance) as i32;

        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// An OCR capability: turns an image into text.
pub trait TextRecognizer {
    /// Recognize all text in an image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Recognize text, reporting progress in percent through `on_progress`.
    ///
    /// Engines that cannot observe their own progress report completion only.
    fn recognize_with_progress(
        &self,
        image: &DynamicImage,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<OcrResult, OcrError> {
        let result = self.recognize(image)?;
        on_progress(100);
        Ok(result)
    }
}
