//! Error types for the dialscan-core library.

use thiserror::Error;

/// Main error type for the dialscan library.
#[derive(Error, Debug)]
pub enum DialscanError {
    /// OCR engine setup or processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// The OCR pass over an image failed, so no text was available.
    ///
    /// Distinct from an extraction that ran and found no phone numbers,
    /// which is reported as an empty contact list.
    #[error("text extraction failed: {0}")]
    TextExtraction(#[source] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the dialscan library.
pub type Result<T> = std::result::Result<T, DialscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_extraction_is_distinct_from_ocr() {
        let err = DialscanError::TextExtraction(OcrError::Recognition("blank page".into()));
        assert_eq!(
            err.to_string(),
            "text extraction failed: text recognition failed: blank page"
        );
        assert!(std::error::Error::source(&err).is_some());

        let err: DialscanError = OcrError::ModelLoad("det.onnx".into()).into();
        assert!(matches!(err, DialscanError::Ocr(_)));
    }
}
