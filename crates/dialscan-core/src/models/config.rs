//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::contacts::rules::scheme_by_id;
use crate::error::{DialscanError, Result};

/// Main configuration for the dialscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Contact extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Maximum image dimension (longer side) for processing.
    pub max_image_size: u32,

    /// Vertical distance in pixels under which two boxes share a text row.
    pub row_tolerance: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            keep_unk: false,
            max_image_size: 2048,
            row_tolerance: 20.0,
        }
    }
}

/// Contact extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Numbering scheme identifier.
    pub scheme: String,

    /// Characters of source text kept on each side of a match in the context snippet.
    pub context_radius: usize,

    /// Contacts scoring below this are dropped.
    pub min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            scheme: "IN".to_string(),
            context_radius: 50,
            min_confidence: 0.0,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "en_rec.onnx".to_string(),
            dictionary: "en_dict.txt".to_string(),
        }
    }
}

impl DialscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        if scheme_by_id(&self.extraction.scheme).is_none() {
            return Err(DialscanError::Config(format!(
                "unknown numbering scheme: {}",
                self.extraction.scheme
            )));
        }

        if !(0.0..=1.0).contains(&self.extraction.min_confidence) {
            return Err(DialscanError::Config(format!(
                "min_confidence must be within 0.0..=1.0, got {}",
                self.extraction.min_confidence
            )));
        }

        if self.ocr.max_image_size == 0 {
            return Err(DialscanError::Config("max_image_size must be positive".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = DialscanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.extraction.scheme, "IN");
        assert_eq!(config.extraction.context_radius, 50);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DialscanConfig =
            serde_json::from_str(r#"{"extraction": {"min_confidence": 0.8}}"#).unwrap();
        assert_eq!(config.extraction.min_confidence, 0.8);
        assert_eq!(config.extraction.scheme, "IN");
        assert_eq!(config.models.detection_model, "det.onnx");
    }

    #[test]
    fn test_validate_rejects_unknown_scheme() {
        let mut config = DialscanConfig::default();
        config.extraction.scheme = "XX".into();
        assert!(matches!(config.validate(), Err(DialscanError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_confidence_out_of_range() {
        let mut config = DialscanConfig::default();
        config.extraction.min_confidence = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DialscanConfig::default();
        config.extraction.context_radius = 80;
        config.save(&path).unwrap();

        let loaded = DialscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.context_radius, 80);
        assert_eq!(loaded.models.model_dir, PathBuf::from("models"));
    }
}
