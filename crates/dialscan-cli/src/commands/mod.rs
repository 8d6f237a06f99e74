//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use dialscan_core::models::config::DialscanConfig;
use dialscan_core::{ContactParser, ExtractedContact, PureOcrEngine};

/// How an input file is turned into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Screenshot, recognized with OCR.
    Image,
    /// Plain text, used as-is.
    Text,
}

impl InputKind {
    /// Classify a file by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "png" | "jpg" | "jpeg" | "webp" | "bmp" | "tiff" | "tif" => Some(Self::Image),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DialscanConfig> {
    if let Some(path) = config_path {
        return Ok(DialscanConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        return Ok(DialscanConfig::from_file(&default_path)?);
    }

    Ok(DialscanConfig::default())
}

/// Load the OCR engine, preferring an explicit model directory over configuration.
pub fn load_engine(model_dir: Option<&Path>, config: &DialscanConfig) -> anyhow::Result<PureOcrEngine> {
    let model_dir: PathBuf = model_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.models.model_dir.clone());

    let det_model = model_dir.join(&config.models.detection_model);
    let rec_model = model_dir.join(&config.models.recognition_model);

    if !det_model.exists() || !rec_model.exists() {
        anyhow::bail!(
            "OCR models not found at {}.\n\n\
             Place {} and {} there, or pass --model-dir.",
            model_dir.display(),
            config.models.detection_model,
            config.models.recognition_model
        );
    }

    debug!("Loading OCR models from {}", model_dir.display());
    PureOcrEngine::from_dir(&model_dir, config.ocr.clone(), &config.models)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))
}

/// Extract contacts from one input file.
pub fn extract_file<F>(
    path: &Path,
    kind: InputKind,
    parser: &ContactParser,
    engine: Option<&PureOcrEngine>,
    on_progress: F,
) -> anyhow::Result<Vec<ExtractedContact>>
where
    F: FnMut(u8),
{
    match kind {
        InputKind::Text => {
            let text = fs::read_to_string(path)?;
            Ok(parser.extract_with_progress(&text, on_progress))
        }
        InputKind::Image => {
            let Some(engine) = engine else {
                anyhow::bail!("No OCR engine available for {}", path.display());
            };
            let image = image::open(path)?;
            Ok(parser.extract_from_image_with_progress(engine, &image, on_progress)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind() {
        assert_eq!(InputKind::from_path(Path::new("a/shot.PNG")), Some(InputKind::Image));
        assert_eq!(InputKind::from_path(Path::new("card.webp")), Some(InputKind::Image));
        assert_eq!(InputKind::from_path(Path::new("notes.txt")), Some(InputKind::Text));
        assert_eq!(InputKind::from_path(Path::new("scan.pdf")), None);
        assert_eq!(InputKind::from_path(Path::new("README")), None);
    }
}
