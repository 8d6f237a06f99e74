//! Numbering schemes: cleaning, validation, normalization and formatting.
//!
//! A [`NumberingScheme`] bundles everything that is specific to one region's
//! phone numbers, including the candidate patterns used to find them, so the
//! rest of the pipeline never hardcodes a country.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::contact::NormalizedNumber;

use super::patterns::*;

/// A named candidate pattern.
#[derive(Debug, Clone, Copy)]
pub struct PhonePattern {
    pub name: &'static str,
    pub regex: &'static Regex,
}

/// Region-specific phone number rules.
pub trait NumberingScheme: Send + Sync + fmt::Debug {
    /// Short identifier used in configuration, e.g. `IN`.
    fn id(&self) -> &'static str;

    /// Country calling code without the `+`.
    fn country_code(&self) -> &'static str;

    /// Whether the raw string is a phone number in this scheme.
    fn is_valid(&self, raw: &str) -> bool;

    /// Reduce to the bare subscriber number.
    fn normalize(&self, raw: &str) -> String;

    /// Human-readable display form, or the cleaned digits for unrecognized shapes.
    fn format(&self, raw: &str) -> String;

    /// Ordered candidate patterns, deliberately overlapping.
    fn patterns(&self) -> &[PhonePattern];

    /// Country code for a number that validates; `None` otherwise.
    fn country_code_for(&self, raw: &str) -> Option<&'static str> {
        self.is_valid(raw).then(|| self.country_code())
    }

    /// Compute every derived form of a raw candidate.
    fn classify(&self, raw: &str) -> NormalizedNumber {
        let is_valid = self.is_valid(raw);
        NormalizedNumber {
            cleaned: clean(raw),
            normalized: self.normalize(raw),
            formatted: self.format(raw),
            country_code: if is_valid {
                self.country_code().to_string()
            } else {
                String::new()
            },
            is_valid,
        }
    }
}

/// Strip everything except digits and a single leading `+`.
///
/// A `+` survives only when nothing has been kept before it.
pub fn clean(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() || (c == '+' && cleaned.is_empty()) {
            cleaned.push(c);
        }
    }
    cleaned
}

lazy_static! {
    static ref INDIAN_PATTERNS: Vec<PhonePattern> = vec![
        PhonePattern { name: "intl_mobile", regex: &IN_INTL_MOBILE },
        PhonePattern { name: "intl_trunk_mobile", regex: &IN_INTL_TRUNK_MOBILE },
        PhonePattern { name: "trunk_mobile", regex: &IN_TRUNK_MOBILE },
        PhonePattern { name: "mobile", regex: &IN_MOBILE },
        PhonePattern { name: "trunk_landline", regex: &IN_TRUNK_LANDLINE },
        PhonePattern { name: "generic_ten", regex: &GENERIC_TEN },
        PhonePattern { name: "generic_trunk", regex: &GENERIC_TRUNK },
        PhonePattern { name: "generic_ten_eleven", regex: &GENERIC_TEN_ELEVEN },
        PhonePattern { name: "loose_mobile", regex: &LOOSE_MOBILE },
        PhonePattern { name: "loose_trunk_mobile", regex: &LOOSE_TRUNK_MOBILE },
        PhonePattern { name: "grouped", regex: &GROUPED },
        PhonePattern { name: "grouped_5_5", regex: &GROUPED_5_5 },
        PhonePattern { name: "grouped_4_3_3", regex: &GROUPED_4_3_3 },
    ];
}

/// Indian numbering: 10-digit mobiles starting 6-9, optional `0` trunk
/// prefix, optional `+91` country prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndianScheme;

const INDIA_PREFIX: &str = "+91";

fn is_mobile(digits: &str) -> bool {
    digits.len() == 10 && matches!(digits.as_bytes()[0], b'6'..=b'9')
}

fn is_trunk_prefixed(digits: &str, second: std::ops::RangeInclusive<u8>) -> bool {
    let bytes = digits.as_bytes();
    bytes.len() == 11 && bytes[0] == b'0' && second.contains(&bytes[1])
}

impl NumberingScheme for IndianScheme {
    fn id(&self) -> &'static str {
        "IN"
    }

    fn country_code(&self) -> &'static str {
        "91"
    }

    fn is_valid(&self, raw: &str) -> bool {
        let cleaned = clean(raw);

        if let Some(rest) = cleaned.strip_prefix(INDIA_PREFIX) {
            return is_mobile(rest) || is_trunk_prefixed(rest, b'6'..=b'9');
        }

        // Digits only from here on; other country prefixes are out of scheme
        if cleaned.is_empty() || cleaned.starts_with('+') {
            return false;
        }

        is_mobile(&cleaned) || is_trunk_prefixed(&cleaned, b'1'..=b'9')
    }

    fn normalize(&self, raw: &str) -> String {
        let cleaned = clean(raw);

        if let Some(rest) = cleaned.strip_prefix(INDIA_PREFIX) {
            return rest.strip_prefix('0').unwrap_or(rest).to_string();
        }

        if cleaned.len() == 11 && cleaned.starts_with('0') {
            return cleaned[1..].to_string();
        }

        cleaned
    }

    fn format(&self, raw: &str) -> String {
        let cleaned = clean(raw);

        let subscriber = if let Some(rest) = cleaned.strip_prefix(INDIA_PREFIX) {
            match rest.len() {
                10 => Some(rest),
                11 if rest.starts_with('0') => Some(&rest[1..]),
                _ => None,
            }
        } else if cleaned.len() == 11 && cleaned.starts_with('0') {
            Some(&cleaned[1..])
        } else if is_mobile(&cleaned) {
            Some(cleaned.as_str())
        } else {
            None
        };

        match subscriber {
            Some(number) => format!("{} {} {}", INDIA_PREFIX, &number[..5], &number[5..]),
            None => cleaned,
        }
    }

    fn patterns(&self) -> &[PhonePattern] {
        &INDIAN_PATTERNS
    }
}
