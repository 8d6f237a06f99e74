//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{ModelConfig, OcrConfig};

use super::{OcrResult, TextBox, TextRecognizer};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory.
    pub fn from_dir(model_dir: &Path, config: OcrConfig, models: &ModelConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&models.detection_model);
        let rec_path = model_dir.join(&models.recognition_model);
        let dict_path = model_dir.join(&models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, config })
    }

    fn run(&self, image: &DynamicImage, on_progress: &mut dyn FnMut(u8)) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("{}x{}", width, height)));
        }

        info!("Processing image: {}x{}", width, height);

        let resized = fit_to_limit(image, self.config.max_image_size);
        let input = resized.as_ref().unwrap_or(image);
        // Boxes come back in the coordinates of the image actually processed
        let processed_size = input.dimensions();
        on_progress(20);

        let results = self
            .engine
            .run_from_image(input)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;
        on_progress(90);

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox {
                    bbox: polygon_to_bbox(&r.bounding_box),
                    text,
                    confidence: r.confidence,
                }
            })
            .collect();

        let mut result = OcrResult::from_boxes(boxes, processed_size, self.config.row_tolerance);
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} text boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );
        on_progress(100);

        Ok(result)
    }
}

impl TextRecognizer for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        self.run(image, &mut |_| {})
    }

    fn recognize_with_progress(
        &self,
        image: &DynamicImage,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<OcrResult, OcrError> {
        self.run(image, on_progress)
    }
}

/// Shrink images whose longer side exceeds `limit`, keeping the aspect ratio.
fn fit_to_limit(image: &DynamicImage, limit: u32) -> Option<DynamicImage> {
    let (width, height) = image.dimensions();

    if width.max(height) <= limit {
        return None;
    }

    debug!("Downscaling {}x{} image to fit {}px", width, height, limit);
    Some(image.resize(limit, limit, image::imageops::FilterType::Triangle))
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_is_model_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PureOcrEngine::from_dir(dir.path(), OcrConfig::default(), &ModelConfig::default());
        assert!(matches!(result, Err(OcrError::ModelLoad(_))));
    }

    #[test]
    fn test_fit_to_limit_downscales_long_side() {
        let wide = DynamicImage::new_rgb8(4096, 1024);
        let resized = fit_to_limit(&wide, 2048).unwrap();
        assert_eq!(resized.dimensions(), (2048, 512));

        let small = DynamicImage::new_rgb8(800, 600);
        assert!(fit_to_limit(&small, 2048).is_none());
        assert!(fit_to_limit(&small, 800).is_none());
    }
}
