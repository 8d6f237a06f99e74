//! Contact data models produced by the extraction pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A substring of OCR text that matched a digit-oriented pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Matched text, exactly as it appears in the source.
    pub text: String,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
    /// Name of the pattern that produced the match.
    pub pattern: &'static str,
}

/// A candidate after cleaning, validation and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedNumber {
    /// Digits with an optional leading `+`.
    pub cleaned: String,
    /// Bare subscriber number, international and trunk prefixes stripped.
    pub normalized: String,
    /// Grouped display form.
    pub formatted: String,
    /// Country calling code of the numbering scheme.
    pub country_code: String,
    /// Whether the scheme accepts the number.
    pub is_valid: bool,
}

/// A validated match: where it was found and what it normalizes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMatch {
    pub candidate: RawCandidate,
    pub number: NormalizedNumber,
}

/// A phone number extracted from text, enriched with nearby contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContact {
    /// Normalized subscriber number.
    pub phone_number: String,
    /// Display form, e.g. `+91 98765 43210`.
    pub formatted_number: String,
    /// Country calling code, e.g. `91`.
    pub country_code: String,
    /// Whether the number passed scheme validation.
    pub is_valid: bool,
    /// Heuristic confidence in 0.0..=1.0.
    pub confidence: f32,
    /// Associated personal name, empty when none was found.
    pub name: String,
    /// Associated email address, empty when none was found.
    pub email: String,
    /// Source text surrounding the match.
    pub context: String,
    /// The substring the number was recognized from.
    pub matched_text: String,
}

/// Aggregate figures over a set of extracted contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Mean confidence, 0.0 for an empty set.
    pub average_confidence: f32,
    /// Lowest confidence, 0.0 for an empty set.
    pub min_confidence: f32,
    /// Highest confidence, 0.0 for an empty set.
    pub max_confidence: f32,
    /// Contact count per country code.
    pub by_country: BTreeMap<String, usize>,
}

impl ContactSummary {
    /// Summarize a list of contacts.
    pub fn from_contacts(contacts: &[ExtractedContact]) -> Self {
        let total = contacts.len();
        let valid = contacts.iter().filter(|c| c.is_valid).count();

        let (average_confidence, min_confidence, max_confidence) = if total == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let confidences = contacts.iter().map(|c| c.confidence);
            (
                confidences.clone().sum::<f32>() / total as f32,
                confidences.clone().fold(f32::INFINITY, f32::min),
                confidences.fold(f32::NEG_INFINITY, f32::max),
            )
        };

        let mut by_country = BTreeMap::new();
        for contact in contacts {
            let code = if contact.country_code.is_empty() {
                "unknown".to_string()
            } else {
                contact.country_code.clone()
            };
            *by_country.entry(code).or_insert(0) += 1;
        }

        Self {
            total,
            valid,
            invalid: total - valid,
            average_confidence,
            min_confidence,
            max_confidence,
            by_country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn contact(number: &str, confidence: f32, is_valid: bool) -> ExtractedContact {
        ExtractedContact {
            phone_number: number.to_string(),
            formatted_number: number.to_string(),
            country_code: "91".to_string(),
            is_valid,
            confidence,
            name: String::new(),
            email: String::new(),
            context: String::new(),
            matched_text: number.to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let contacts = vec![
            contact("9876543210", 0.9, true),
            contact("9123456789", 0.7, true),
            contact("8123456789", 0.5, false),
        ];

        let summary = ContactSummary::from_contacts(&contacts);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);
        assert!((summary.average_confidence - 0.7).abs() < 1e-6);
        assert_eq!(summary.min_confidence, 0.5);
        assert_eq!(summary.max_confidence, 0.9);
        assert_eq!(summary.by_country.get("91"), Some(&3));
    }

    #[test]
    fn test_summary_empty() {
        let summary = ContactSummary::from_contacts(&[]);
        assert_eq!(summary, ContactSummary::default());
    }

    #[test]
    fn test_contact_serializes_camel_case() {
        let json = serde_json::to_value(contact("9876543210", 0.9, true)).unwrap();
        assert_eq!(json["phoneNumber"], "9876543210");
        assert_eq!(json["isValid"], true);
        assert!(json.get("formattedNumber").is_some());
    }

    #[test]
    fn test_summary_serializes_confidence_range() {
        let summary = ContactSummary::from_contacts(&[contact("9876543210", 0.7, true)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["minConfidence"], json["maxConfidence"]);
        assert!(json.get("averageConfidence").is_some());
    }
}
