//! Contact parser orchestrating matching, scoring and association.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{DialscanError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::contact::{ExtractedContact, PhoneMatch};
use crate::ocr::TextRecognizer;

use super::rules::{
    find_associated_email, find_associated_name, scheme_by_id, score_confidence, FieldExtractor,
    IndianScheme, NumberingScheme, PhoneExtractor,
};
use super::ContactExtractor;

/// Progress reported before any work is done.
const PROGRESS_STARTED: u8 = 10;
/// Progress once text is available for matching.
const PROGRESS_TEXT_READY: u8 = 50;
/// Progress after candidate matching.
const PROGRESS_MATCHED: u8 = 75;
const PROGRESS_DONE: u8 = 100;

/// Contact parser turning OCR text into enriched phone contacts.
#[derive(Debug, Clone)]
pub struct ContactParser {
    /// Numbering scheme used for matching and validation.
    scheme: Arc<dyn NumberingScheme>,
    /// Characters kept on each side of a match in the context snippet.
    context_radius: usize,
    /// Minimum confidence for keeping a contact.
    min_confidence: f32,
}

impl ContactParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            scheme: Arc::new(IndianScheme),
            context_radius: 50,
            min_confidence: 0.0,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let scheme = scheme_by_id(&config.scheme).ok_or_else(|| {
            DialscanError::Config(format!("unknown numbering scheme: {}", config.scheme))
        })?;

        if !(0.0..=1.0).contains(&config.min_confidence) {
            return Err(DialscanError::Config(format!(
                "min_confidence must be within 0.0..=1.0, got {}",
                config.min_confidence
            )));
        }

        Ok(Self {
            scheme,
            context_radius: config.context_radius,
            min_confidence: config.min_confidence,
        })
    }

    /// Set the numbering scheme.
    pub fn with_scheme(mut self, scheme: Arc<dyn NumberingScheme>) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the context snippet radius.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// Set minimum confidence threshold.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// The numbering scheme in use.
    pub fn scheme(&self) -> &dyn NumberingScheme {
        self.scheme.as_ref()
    }

    /// Extract contacts from OCR text.
    pub fn extract(&self, text: &str) -> Vec<ExtractedContact> {
        self.run(text, &mut |_: u8| {})
    }

    /// Extract contacts from OCR text, reporting progress in percent.
    ///
    /// The callback sees 10, 50, 75 and 100 in that order, or 10 and 100 for
    /// blank input. A panicking callback is logged and otherwise ignored.
    pub fn extract_with_progress<F>(&self, text: &str, mut on_progress: F) -> Vec<ExtractedContact>
    where
        F: FnMut(u8),
    {
        self.run(text, &mut on_progress)
    }

    /// Recognize text in an image, then extract contacts from it.
    pub fn extract_from_image(
        &self,
        recognizer: &dyn TextRecognizer,
        image: &DynamicImage,
    ) -> Result<Vec<ExtractedContact>> {
        self.extract_from_image_with_progress(recognizer, image, |_| {})
    }

    /// Recognize text in an image and extract contacts, reporting progress.
    ///
    /// OCR progress is mapped into the 10..=50 range. A failed recognition is
    /// an error; recognizing no text yields an empty list.
    pub fn extract_from_image_with_progress<F>(
        &self,
        recognizer: &dyn TextRecognizer,
        image: &DynamicImage,
        mut on_progress: F,
    ) -> Result<Vec<ExtractedContact>>
    where
        F: FnMut(u8),
    {
        report(&mut on_progress, PROGRESS_STARTED);

        let ocr_result = {
            let mut ocr_progress = |percent: u8| {
                let span = u16::from(PROGRESS_TEXT_READY - PROGRESS_STARTED);
                let mapped = u16::from(percent.min(100)) * span / 100;
                report(&mut on_progress, PROGRESS_STARTED + mapped as u8);
            };
            recognizer
                .recognize_with_progress(image, &mut ocr_progress)
                .map_err(DialscanError::TextExtraction)?
        };

        debug!(
            "OCR produced {} boxes in {} ms",
            ocr_result.boxes.len(),
            ocr_result.processing_time_ms
        );

        if ocr_result.is_blank() {
            info!("No text recognized in image");
            report(&mut on_progress, PROGRESS_DONE);
            return Ok(Vec::new());
        }

        Ok(self.run_from_text_stage(&ocr_result.text, &mut on_progress))
    }

    fn run(&self, text: &str, on_progress: &mut dyn FnMut(u8)) -> Vec<ExtractedContact> {
        report(on_progress, PROGRESS_STARTED);

        if text.trim().is_empty() {
            debug!("Empty text, nothing to extract");
            report(on_progress, PROGRESS_DONE);
            return Vec::new();
        }

        self.run_from_text_stage(text, on_progress)
    }

    fn run_from_text_stage(
        &self,
        text: &str,
        on_progress: &mut dyn FnMut(u8),
    ) -> Vec<ExtractedContact> {
        let start = Instant::now();
        report(on_progress, PROGRESS_TEXT_READY);

        info!("Extracting contacts from {} characters of text", text.len());

        let matches = PhoneExtractor::with_scheme(Arc::clone(&self.scheme)).extract_all(text);
        debug!("Matched {} unique phone numbers", matches.len());
        report(on_progress, PROGRESS_MATCHED);

        let mut contacts: Vec<ExtractedContact> = matches
            .into_iter()
            .map(|m| self.build_contact(m, text))
            .collect();

        let before = contacts.len();
        contacts.retain(|c| c.confidence >= self.min_confidence);
        if contacts.len() < before {
            debug!(
                "Dropped {} contacts below confidence {}",
                before - contacts.len(),
                self.min_confidence
            );
        }

        info!(
            "Extracted {} contacts in {} ms",
            contacts.len(),
            start.elapsed().as_millis()
        );
        report(on_progress, PROGRESS_DONE);

        contacts
    }

    fn build_contact(&self, m: PhoneMatch, text: &str) -> ExtractedContact {
        let PhoneMatch { candidate, number } = m;

        ExtractedContact {
            confidence: score_confidence(&number.normalized, text),
            name: find_associated_name(&candidate.text, text),
            email: find_associated_email(&candidate.text, text),
            context: context_snippet(text, candidate.start, candidate.end, self.context_radius),
            phone_number: number.normalized,
            formatted_number: number.formatted,
            country_code: number.country_code,
            is_valid: number.is_valid,
            matched_text: candidate.text,
        }
    }
}

impl Default for ContactParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactExtractor for ContactParser {
    fn extract_from_text(&self, text: &str) -> Vec<ExtractedContact> {
        self.extract(text)
    }
}

/// Invoke a progress callback, swallowing any panic it raises.
fn report(on_progress: &mut dyn FnMut(u8), percent: u8) {
    if catch_unwind(AssertUnwindSafe(|| on_progress(percent))).is_err() {
        warn!("Progress callback panicked at {}%, continuing", percent);
    }
}

/// Up to `radius` characters on each side of `start..end`, trimmed.
fn context_snippet(text: &str, start: usize, end: usize, radius: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map_or(start, |(i, _)| i);

    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);

    text[from..to].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::ocr::OcrResult;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_single_contact() {
        let parser = ContactParser::new();
        let contacts = parser.extract("Ravi Kumar\nMobile: 98765 43210\nravi@example.com");

        assert_eq!(contacts.len(), 1);
        let contact = &contacts[0];
        assert_eq!(contact.phone_number, "9876543210");
        assert_eq!(contact.formatted_number, "+91 98765 43210");
        assert_eq!(contact.country_code, "91");
        assert!(contact.is_valid);
        assert_eq!(contact.name, "Ravi Kumar");
        assert_eq!(contact.email, "ravi@example.com");
        assert_eq!(contact.matched_text, "98765 43210");
        assert!((contact.confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_text() {
        let parser = ContactParser::new();
        assert!(parser.extract("").is_empty());
        assert!(parser.extract(" \n\t ").is_empty());
    }

    #[test]
    fn test_progress_milestones() {
        let parser = ContactParser::new();

        let mut seen = Vec::new();
        let contacts = parser.extract_with_progress("Ravi 9876543210", |p| seen.push(p));
        assert_eq!(contacts.len(), 1);
        assert_eq!(seen, vec![10, 50, 75, 100]);

        let mut seen = Vec::new();
        parser.extract_with_progress("   ", |p| seen.push(p));
        assert_eq!(seen, vec![10, 100]);
    }

    #[test]
    fn test_panicking_progress_callback() {
        let parser = ContactParser::new();
        let text = "Call John Smith at 9876543210 or john@example.com";

        let expected = parser.extract(text);
        let contacts = parser.extract_with_progress(text, |p| {
            if p == 50 {
                panic!("callback failure");
            }
        });

        assert_eq!(contacts, expected);
    }

    #[test]
    fn test_min_confidence_filter() {
        let text = "Ravi 9876543210";
        assert_eq!(ContactParser::new().with_min_confidence(0.85).extract(text).len(), 1);
        assert!(ContactParser::new().with_min_confidence(0.95).extract(text).is_empty());
    }

    #[test]
    fn test_context_snippet() {
        let text = "aaaa bbbb 9876543210 cccc dddd";
        let contacts = ContactParser::new().with_context_radius(6).extract(text);
        assert_eq!(contacts[0].context, "bbbb 9876543210 cccc");

        assert_eq!(context_snippet("ééé123ééé", 6, 9, 2), "éé123éé");
        assert_eq!(context_snippet("123", 0, 3, 0), "123");
    }

    #[test]
    fn test_from_config() {
        let parser = ContactParser::from_config(&ExtractionConfig::default()).unwrap();
        assert_eq!(parser.scheme().id(), "IN");

        let config = ExtractionConfig {
            scheme: "XX".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ContactParser::from_config(&config),
            Err(DialscanError::Config(_))
        ));

        let config = ExtractionConfig {
            min_confidence: 1.5,
            ..Default::default()
        };
        assert!(ContactParser::from_config(&config).is_err());
    }

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContactParser>();
    }

    #[test]
    fn test_extract_from_ocr_result() {
        let mut ocr = OcrResult::empty(10, 10);
        ocr.text = "Meera Nair\n+91 81234 56789".to_string();

        let contacts = ContactParser::new().extract_from_ocr(&ocr);
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone_number, "8123456789");
        assert_eq!(contacts[0].name, "Meera Nair");
    }

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(&self, _image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            let mut result = OcrResult::empty(1, 1);
            result.text = self.0.to_string();
            Ok(result)
        }
    }

    struct Failing;

    impl TextRecognizer for Failing {
        fn recognize(&self, _image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            Err(OcrError::Recognition("engine crashed".into()))
        }
    }

    #[test]
    fn test_extract_from_image() {
        let image = DynamicImage::new_rgb8(1, 1);
        let parser = ContactParser::new();

        let mut seen = Vec::new();
        let contacts = parser
            .extract_from_image_with_progress(&FixedText("Tel 9876543210"), &image, |p| seen.push(p))
            .unwrap();

        assert_eq!(contacts.len(), 1);
        assert_eq!(seen, vec![10, 50, 50, 75, 100]);
    }

    #[test]
    fn test_extract_from_blank_image() {
        let image = DynamicImage::new_rgb8(1, 1);
        let contacts = ContactParser::new()
            .extract_from_image(&FixedText("  "), &image)
            .unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_ocr_failure_is_text_extraction_error() {
        let image = DynamicImage::new_rgb8(1, 1);
        let result = ContactParser::new().extract_from_image(&Failing, &image);
        assert!(matches!(result, Err(DialscanError::TextExtraction(_))));
    }
}
