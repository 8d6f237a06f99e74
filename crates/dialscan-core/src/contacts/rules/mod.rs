//! Rule-based extractors for phone numbers and their associated contact details.

pub mod association;
pub mod confidence;
pub mod patterns;
pub mod phone;
pub mod scheme;

use std::sync::Arc;

pub use association::{
    extract_emails, extract_names, find_associated_email, find_associated_name, is_valid_name,
    EmailExtractor, NameExtractor,
};
pub use confidence::score_confidence;
pub use phone::{extract_phone_numbers, PhoneExtractor};
pub use scheme::{clean, IndianScheme, NumberingScheme, PhonePattern};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Look up a numbering scheme by its configuration identifier.
pub fn scheme_by_id(id: &str) -> Option<Arc<dyn NumberingScheme>> {
    match id.trim().to_ascii_uppercase().as_str() {
        "IN" | "IND" => Some(Arc::new(IndianScheme)),
        _ => None,
    }
}

/// Strip formatting from a phone number.
pub fn clean_phone(raw: &str) -> String {
    clean(raw)
}

/// Validate a phone number against the default (Indian) scheme.
pub fn validate_phone(raw: &str) -> bool {
    IndianScheme.is_valid(raw)
}

/// Format a phone number for display using the default scheme.
pub fn format_phone(raw: &str) -> String {
    IndianScheme.format(raw)
}

/// Reduce a phone number to its bare subscriber form using the default scheme.
pub fn normalize_phone(raw: &str) -> String {
    IndianScheme.normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_by_id() {
        assert_eq!(scheme_by_id("IN").map(|s| s.id()), Some("IN"));
        assert_eq!(scheme_by_id(" in ").map(|s| s.country_code()), Some("91"));
        assert!(scheme_by_id("PL").is_none());
    }

    #[test]
    fn test_default_scheme_helpers() {
        assert!(validate_phone("+91 98765 43210"));
        assert_eq!(format_phone("9876543210"), "+91 98765 43210");
        assert_eq!(normalize_phone("+91 98765 43210"), "9876543210");
        assert_eq!(clean_phone("98765 43210"), "9876543210");
    }
}
