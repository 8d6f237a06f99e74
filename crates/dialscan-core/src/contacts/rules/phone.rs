//! Phone number candidate matching.
//!
//! Matching runs in two phases over the same text: every run of 7-15 digits
//! is checked directly, then every pattern of the numbering scheme is applied.
//! Both phases feed one try-and-validate step, and results are deduplicated
//! by normalized number so overlapping patterns cannot produce duplicates.

use std::sync::Arc;

use regex::Match;
use tracing::{debug, trace};

use crate::models::contact::{PhoneMatch, RawCandidate};

use super::patterns::DIGIT_RUN;
use super::scheme::{IndianScheme, NumberingScheme};
use super::FieldExtractor;

/// Phone number field extractor.
#[derive(Debug, Clone)]
pub struct PhoneExtractor {
    scheme: Arc<dyn NumberingScheme>,
}

impl PhoneExtractor {
    /// Create a phone extractor for the default (Indian) scheme.
    pub fn new() -> Self {
        Self::with_scheme(Arc::new(IndianScheme))
    }

    /// Create a phone extractor for a specific numbering scheme.
    pub fn with_scheme(scheme: Arc<dyn NumberingScheme>) -> Self {
        Self { scheme }
    }

    fn try_accept(&self, text: &str, m: Match<'_>, pattern: &'static str, results: &mut Vec<PhoneMatch>) {
        if is_digit_run_fragment(text, m.start(), m.end()) {
            trace!("Skipping {:?} from {}: part of a longer digit run", m.as_str(), pattern);
            return;
        }

        if !self.scheme.is_valid(m.as_str()) {
            trace!("Rejected {:?} from {}", m.as_str(), pattern);
            return;
        }

        let number = self.scheme.classify(m.as_str());

        // Skip if already found by an earlier phase or pattern
        if results.iter().any(|r| r.number.normalized == number.normalized) {
            return;
        }

        debug!("Accepted {:?} from {} as {}", m.as_str(), pattern, number.normalized);
        results.push(PhoneMatch {
            candidate: RawCandidate {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
                pattern,
            },
            number,
        });
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = PhoneMatch;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for m in DIGIT_RUN.find_iter(text) {
            self.try_accept(text, m, "digit_run", &mut results);
        }

        for pattern in self.scheme.patterns() {
            for m in pattern.regex.find_iter(text) {
                self.try_accept(text, m, pattern.name, &mut results);
            }
        }

        results
    }
}

/// Extract all phone numbers from text using the default scheme.
pub fn extract_phone_numbers(text: &str) -> Vec<PhoneMatch> {
    PhoneExtractor::new().extract_all(text)
}

/// True when a match borders another digit, i.e. it was cut out of a longer run.
fn is_digit_run_fragment(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}
