//! WASM bindings for screenshot phone number extraction.
//!
//! OCR runs in the browser; these bindings take the recognized text and
//! return contacts as plain JS objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use dialscan_core::contacts::rules;
use dialscan_core::{ContactParser, ContactSummary, ExtractedContact};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize to plain JS objects rather than `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract phone contacts from OCR text.
#[wasm_bindgen]
pub fn extract_contacts(text: &str) -> Result<JsValue, JsValue> {
    to_js(&ContactParser::new().extract(text))
}

/// Extract phone contacts, calling `on_progress(percent)` as work advances.
///
/// Exceptions thrown by the callback are logged to the console and do not
/// stop extraction.
#[wasm_bindgen]
pub fn extract_contacts_with_progress(
    text: &str,
    on_progress: &js_sys::Function,
) -> Result<JsValue, JsValue> {
    let contacts = ContactParser::new().extract_with_progress(text, |percent| {
        if let Err(e) = on_progress.call1(&JsValue::NULL, &JsValue::from(percent)) {
            web_sys::console::warn_2(&JsValue::from_str("progress callback failed:"), &e);
        }
    });

    to_js(&contacts)
}

/// Validate a phone number against the Indian numbering scheme.
#[wasm_bindgen]
pub fn validate_phone(phone: &str) -> bool {
    rules::validate_phone(phone)
}

/// Format a phone number for display (e.g. "+91 98765 43210").
#[wasm_bindgen]
pub fn format_phone(phone: &str) -> String {
    rules::format_phone(phone)
}

/// Strip everything but digits and a leading "+".
#[wasm_bindgen]
pub fn clean_phone(phone: &str) -> String {
    rules::clean_phone(phone)
}

/// Reduce a phone number to its bare subscriber digits.
#[wasm_bindgen]
pub fn normalize_phone(phone: &str) -> String {
    rules::normalize_phone(phone)
}

/// Contact extractor class for browser use.
#[wasm_bindgen]
pub struct ContactExtractor {
    parser: ContactParser,
}

#[wasm_bindgen]
impl ContactExtractor {
    /// Create a new contact extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: ContactParser::new(),
        }
    }

    /// Drop contacts scoring below `confidence` (0.0 - 1.0).
    #[wasm_bindgen]
    pub fn set_min_confidence(&mut self, confidence: f32) -> Result<(), JsValue> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(JsValue::from_str("min confidence must be within 0.0..=1.0"));
        }
        self.parser = self.parser.clone().with_min_confidence(confidence);
        Ok(())
    }

    /// Characters of surrounding text kept in each contact's context.
    #[wasm_bindgen]
    pub fn set_context_radius(&mut self, radius: usize) {
        self.parser = self.parser.clone().with_context_radius(radius);
    }

    /// Extract contacts from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(text))
    }

    /// Extract contacts together with summary statistics.
    #[wasm_bindgen]
    pub fn extract_with_summary(&self, text: &str) -> Result<JsValue, JsValue> {
        #[derive(Serialize)]
        struct ExtractResult {
            contacts: Vec<ExtractedContact>,
            summary: ContactSummary,
        }

        let contacts = self.parser.extract(text);
        let output = ExtractResult {
            summary: ContactSummary::from_contacts(&contacts),
            contacts,
        };

        to_js(&output)
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result from browser-side processing.
#[wasm_bindgen]
pub struct OcrResultJs {
    lines: Vec<String>,
    text: String,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            text: String::new(),
        }
    }

    /// Add one recognized line of text.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Set the full text, overriding any added lines.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            self.lines.join("\n")
        } else {
            self.text.clone()
        }
    }

    /// Extract contacts from this OCR result.
    #[wasm_bindgen]
    pub fn extract_contacts(&self) -> Result<JsValue, JsValue> {
        extract_contacts(&self.get_text())
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn contacts_from(value: JsValue) -> Vec<ExtractedContact> {
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_phone_helpers() {
        assert!(validate_phone("+91 98765 43210"));
        assert!(!validate_phone("12345"));
        assert_eq!(format_phone("09876543210"), "+91 98765 43210");
        assert_eq!(clean_phone("+91-98765 43210"), "+919876543210");
        assert_eq!(normalize_phone("+91 98765 43210"), "9876543210");
    }

    #[wasm_bindgen_test]
    fn test_extract_contacts() {
        let contacts = contacts_from(
            extract_contacts("Call John Smith at 9876543210 or john@example.com").unwrap(),
        );
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "John Smith");
        assert_eq!(contacts[0].email, "john@example.com");
    }

    #[wasm_bindgen_test]
    fn test_extractor_min_confidence() {
        let mut extractor = ContactExtractor::new();
        assert!(extractor.set_min_confidence(2.0).is_err());

        extractor.set_min_confidence(0.95).unwrap();
        assert!(contacts_from(extractor.extract("Ravi 9876543210").unwrap()).is_empty());
    }

    #[wasm_bindgen_test]
    fn test_ocr_result_lines() {
        let mut result = OcrResultJs::new();
        result.add_line("Meera Nair");
        result.add_line("Mobile 81234 56789");
        assert_eq!(result.get_text(), "Meera Nair\nMobile 81234 56789");

        let contacts = contacts_from(result.extract_contacts().unwrap());
        assert_eq!(contacts[0].phone_number, "8123456789");
        assert_eq!(contacts[0].name, "Meera Nair");
    }
}
