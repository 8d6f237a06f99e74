//! Contact extraction module.

mod parser;
pub mod rules;

pub use parser::ContactParser;

use crate::models::contact::ExtractedContact;
use crate::ocr::OcrResult;

/// Trait for turning recognized text into contacts.
pub trait ContactExtractor {
    /// Extract contacts from plain text.
    fn extract_from_text(&self, text: &str) -> Vec<ExtractedContact>;

    /// Extract contacts from an OCR result.
    fn extract_from_ocr(&self, ocr_result: &OcrResult) -> Vec<ExtractedContact> {
        self.extract_from_text(&ocr_result.text)
    }
}
