//! Confidence scoring for extracted phone numbers.

use super::patterns::{PHONE_KEYWORDS, STRICT_PHONE};
use super::scheme::clean;

const BASE_SCORE: f32 = 0.5;
const LENGTH_BONUS: f32 = 0.2;
const FORMAT_BONUS: f32 = 0.2;
const KEYWORD_BONUS: f32 = 0.1;

/// Score how likely `candidate` is a real phone number, given the text it came from.
///
/// Base 0.5, plus 0.2 when the cleaned candidate is 10-15 characters long,
/// plus 0.2 when it is exactly an optional `+` and 10-15 digits, plus 0.1 when
/// the context mentions a telephony keyword anywhere. Capped at 1.0.
pub fn score_confidence(candidate: &str, context: &str) -> f32 {
    let cleaned = clean(candidate);
    let mut confidence = BASE_SCORE;

    if (10..=15).contains(&cleaned.len()) {
        confidence += LENGTH_BONUS;
    }

    if STRICT_PHONE.is_match(&cleaned) {
        confidence += FORMAT_BONUS;
    }

    let context = context.to_lowercase();
    if PHONE_KEYWORDS.iter().any(|keyword| context.contains(keyword)) {
        confidence += KEYWORD_BONUS;
    }

    confidence.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_score_without_keywords() {
        assert!(approx(score_confidence("9876543210", "Ravi 9876543210"), 0.9));
    }

    #[test]
    fn test_score_with_keyword_caps_at_one() {
        assert!(approx(score_confidence("9876543210", "Mobile: 9876543210"), 1.0));
        assert!(approx(score_confidence("+919876543210", "CALL NOW"), 1.0));
    }

    #[test]
    fn test_score_short_candidate() {
        assert!(approx(score_confidence("12345", "nothing here"), 0.5));
        assert!(approx(score_confidence("12345", "phone"), 0.6));
    }

    #[test]
    fn test_score_bounds() {
        let cases = [
            ("", ""),
            ("+", "tel"),
            ("98765 43210", "Contact number"),
            ("1234567890123456789", "phone"),
        ];
        for (candidate, context) in cases {
            let score = score_confidence(candidate, context);
            assert!((0.0..=1.0).contains(&score), "{} -> {}", candidate, score);
        }
    }

    #[test]
    fn test_score_is_pure() {
        let a = score_confidence("09876543210", "call me");
        let b = score_confidence("09876543210", "call me");
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
