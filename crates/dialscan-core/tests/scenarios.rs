//! End-to-end behavior of the text-to-contact pipeline.

use std::collections::HashSet;

use dialscan_core::contacts::rules::{clean_phone, validate_phone};
use dialscan_core::{ContactParser, ContactSummary, ExtractedContact};
use pretty_assertions::assert_eq;

const SAMPLES: &[&str] = &[
    "Call John Smith at 9876543210 or john@example.com",
    "Priya Sharma\nSales Executive\nMobile: +91 98765 43210\nEmail: priya@example.in",
    "Office: 022-2345-6789\nFax 02223456780\nWhatsApp +91-8123456789",
    "Reach us on 9123 456 789 or 07012345678, ref 98765432109876543210",
    "Meera Nair 6000000000\nRavi Kumar 9999999999\nmeera@nair.dev",
    "Order 123456 shipped, PIN 400001, invoice 5876543210",
    "नमस्ते Anil 9876501234 ✓",
    "",
];

fn extract(text: &str) -> Vec<ExtractedContact> {
    ContactParser::new().extract(text)
}

#[test]
fn scenario_name_and_email_on_same_line() {
    let contacts = extract("Call John Smith at 9876543210 or john@example.com");

    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert_eq!(contact.formatted_number, "+91 98765 43210");
    assert!(contact.is_valid);
    assert_eq!(contact.name, "John Smith");
    assert_eq!(contact.email, "john@example.com");
}

#[test]
fn scenario_empty_input() {
    assert!(extract("").is_empty());
}

#[test]
fn scenario_too_short() {
    assert!(extract("my number is 123").is_empty());
}

#[test]
fn scenario_same_number_in_two_formats() {
    let contacts = extract("Home 9876543210\nOffice +91 98765 43210");

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].phone_number, "9876543210");
    assert_eq!(contacts[0].matched_text, "9876543210");
}

#[test]
fn scenario_long_digit_run_excluded() {
    assert!(extract("Ref 12345678901234567890").is_empty());
    assert!(extract("Ref 98765432109876543210").is_empty());

    let contacts = extract("Ref 98765432109876543210 call 9123456789");
    let numbers: Vec<&str> = contacts.iter().map(|c| c.phone_number.as_str()).collect();
    assert_eq!(numbers, vec!["9123456789"]);
}

#[test]
fn number_split_by_spaces_keeps_its_neighbours() {
    let contacts = extract("Ravi Kumar\nQty 98765 43210 pcs\nravi@example.com");

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].matched_text, "98765 43210");
    assert_eq!(contacts[0].name, "Ravi Kumar");
    assert_eq!(contacts[0].email, "ravi@example.com");
}

#[test]
fn digits_on_separate_lines_are_not_joined() {
    assert!(extract("Ravi Kumar\nQty 98765\n43210 pcs\nravi@example.com").is_empty());
}

#[test]
fn clean_is_idempotent() {
    let inputs = [
        "+91 98765 43210",
        "(022) 2345-6789",
        "++91--",
        "tel:+1+2+3",
        "",
        "abc",
        "९८७६५४३२१०",
    ];

    for input in inputs.iter().chain(SAMPLES) {
        let once = clean_phone(input);
        assert_eq!(clean_phone(&once), once, "input {:?}", input);
    }
}

#[test]
fn every_contact_is_valid() {
    for text in SAMPLES {
        for contact in extract(text) {
            assert!(contact.is_valid, "{:?} in {:?}", contact.matched_text, text);
            assert!(validate_phone(&contact.matched_text), "{:?}", contact.matched_text);
            assert_eq!(contact.country_code, "91");
        }
    }
}

#[test]
fn contacts_are_unique_by_number() {
    for text in SAMPLES {
        let contacts = extract(text);
        let unique: HashSet<&str> = contacts.iter().map(|c| c.phone_number.as_str()).collect();
        assert_eq!(unique.len(), contacts.len(), "duplicates in {:?}", text);
    }
}

#[test]
fn confidence_within_bounds() {
    for text in SAMPLES {
        for contact in extract(text) {
            assert!((0.0..=1.0).contains(&contact.confidence), "{:?}", contact);
        }
    }
}

#[test]
fn extraction_is_deterministic() {
    let parser = ContactParser::new();
    for text in SAMPLES {
        assert_eq!(parser.extract(text), parser.extract(text));
    }
}

#[test]
fn progress_does_not_change_result() {
    let parser = ContactParser::new();
    for text in SAMPLES {
        let mut last = 0;
        let with_progress = parser.extract_with_progress(text, |p| {
            assert!(p >= last);
            last = p;
        });
        assert_eq!(with_progress, parser.extract(text));
        assert_eq!(last, 100);
    }
}

#[test]
fn business_card_summary() {
    let text = "Priya Sharma\nSales Executive\nMobile: +91 98765 43210\nEmail: priya@example.in\n\
                Office 022-2345-6789";
    let contacts = extract(text);

    let numbers: Vec<&str> = contacts.iter().map(|c| c.phone_number.as_str()).collect();
    // 3-4-4 grouping is tried before 5-5 grouping
    assert_eq!(numbers, vec!["2223456789", "9876543210"]);
    assert_eq!(contacts[1].name, "Priya Sharma");
    assert_eq!(contacts[1].email, "priya@example.in");

    let summary = ContactSummary::from_contacts(&contacts);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.valid, 2);
    assert_eq!(summary.by_country.get("91"), Some(&2));
}
