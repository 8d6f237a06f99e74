//! Common regex patterns for contact extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any run of ASCII digits long enough to hold a phone number, checked directly
    pub static ref DIGIT_RUN: Regex = Regex::new(r"[0-9]{7,15}").unwrap();

    // Indian mobile numbers with +91 country code
    pub static ref IN_INTL_MOBILE: Regex = Regex::new(
        r"\+91[-. \t]?[6-9][0-9]{9}"
    ).unwrap();

    pub static ref IN_INTL_TRUNK_MOBILE: Regex = Regex::new(
        r"\+91[-. \t]?0[6-9][0-9]{9}"
    ).unwrap();

    // Indian mobile numbers with 0 trunk prefix
    pub static ref IN_TRUNK_MOBILE: Regex = Regex::new(r"0[6-9][0-9]{9}").unwrap();

    // Indian mobile numbers without prefix (10 digits starting with 6-9)
    pub static ref IN_MOBILE: Regex = Regex::new(r"\b[6-9][0-9]{9}\b").unwrap();

    // Indian landline numbers (0 + area code + subscriber)
    pub static ref IN_TRUNK_LANDLINE: Regex = Regex::new(r"0[1-9][0-9]{9}").unwrap();

    // Generic digit-count patterns
    pub static ref GENERIC_TEN: Regex = Regex::new(r"\b[0-9]{10}\b").unwrap();

    pub static ref GENERIC_TRUNK: Regex = Regex::new(r"\b0[0-9]{9,10}\b").unwrap();

    pub static ref GENERIC_TEN_ELEVEN: Regex = Regex::new(r"\b[0-9]{10,11}\b").unwrap();

    pub static ref LOOSE_MOBILE: Regex = Regex::new(r"\b[6-9][0-9]{8,9}\b").unwrap();

    pub static ref LOOSE_TRUNK_MOBILE: Regex = Regex::new(r"\b0[6-9][0-9]{8,9}\b").unwrap();

    // Groups separated by spaces, tabs, dashes or dots, never across lines
    pub static ref GROUPED: Regex = Regex::new(
        r"\b[0-9]{3,4}[-. \t]?[0-9]{3,4}[-. \t]?[0-9]{3,4}\b"
    ).unwrap();

    pub static ref GROUPED_5_5: Regex = Regex::new(r"\b[0-9]{5}[-. \t]?[0-9]{5}\b").unwrap();

    pub static ref GROUPED_4_3_3: Regex = Regex::new(
        r"\b[0-9]{4}[-. \t]?[0-9]{3}[-. \t]?[0-9]{3}\b"
    ).unwrap();

    // Shape that earns the format bonus in confidence scoring
    pub static ref STRICT_PHONE: Regex = Regex::new(r"^\+?[0-9]{10,15}$").unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Consecutive capitalized words separated by single spaces
    pub static ref CAPITALIZED_RUN: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?: [A-Z][a-z]+)*\b"
    ).unwrap();

    // Lines or tokens with this many digits in a row are never names
    pub static ref NUMERIC_NOISE: Regex = Regex::new(r"[0-9]{3,}").unwrap();
}

/// Words whose presence anywhere in the text hints it talks about telephony.
pub const PHONE_KEYWORDS: &[&str] = &["phone", "call", "contact", "mobile", "tel", "number"];

/// Capitalized words that are labels, function words or honorifics, not names.
pub const NAME_STOPWORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above",
    "below", "between", "among", "phone", "call", "contact", "mobile", "number",
    "email", "address", "name", "mr", "mrs", "ms", "dr", "prof", "tel", "fax",
    "whatsapp", "me", "us", "hi", "hello", "dear", "person",
];
