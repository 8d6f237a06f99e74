//! Name and email association for phone numbers.
//!
//! Both lookups work on a locality window: the trimmed, non-empty lines around
//! the line holding the matched number. When the matched text occurs on several
//! lines, the last one wins.

use super::patterns::{CAPITALIZED_RUN, EMAIL, NAME_STOPWORDS, NUMERIC_NOISE};
use super::FieldExtractor;

/// Lines searched on each side of the matching line.
const WINDOW_RADIUS: usize = 2;

/// Longest capitalized run accepted as a name, in words.
const MAX_NAME_WORDS: usize = 3;

const MAX_NAME_LEN: usize = 50;

/// Email field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        EMAIL.find(text).map(|m| m.as_str().to_lowercase())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        extract_emails(text)
    }
}

/// Personal name field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameExtractor;

impl FieldExtractor for NameExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        extract_names(text)
    }
}

/// Extract all email addresses, lower-cased, in text order.
pub fn extract_emails(text: &str) -> Vec<String> {
    EMAIL
        .find_iter(text)
        .map(|m| m.as_str().trim().to_lowercase())
        .collect()
}

/// Extract plausible personal names, in line order, without duplicates.
///
/// Lines carrying digit runs, `@` or URL markers are skipped. Only when the
/// clean lines yield nothing are those lines rescanned with their offending
/// tokens blanked out, so a name sharing a line with a number still surfaces.
pub fn extract_names(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut names = Vec::new();

    for line in lines.iter().filter(|l| !is_noisy(l)) {
        collect_names(line, &mut names);
    }

    if names.is_empty() {
        for line in lines.iter().filter(|l| is_noisy(l)) {
            collect_names(&blank_noisy_tokens(line), &mut names);
        }
    }

    names
}

/// Check whether a string looks like a personal name.
pub fn is_valid_name(name: &str) -> bool {
    let name = name.trim();

    if name.len() < 2 || name.len() > MAX_NAME_LEN {
        return false;
    }

    if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return false;
    }

    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return false;
    }

    !is_stopword(name)
}

/// Find the name most likely belonging to the phone number matched as `matched`.
pub fn find_associated_name(matched: &str, text: &str) -> String {
    locality_window(matched, text)
        .and_then(|window| NameExtractor.extract(&window))
        .unwrap_or_default()
}

/// Find the email most likely belonging to the phone number matched as `matched`.
pub fn find_associated_email(matched: &str, text: &str) -> String {
    locality_window(matched, text)
        .and_then(|window| EmailExtractor.extract(&window))
        .unwrap_or_default()
}

/// Join the lines within [`WINDOW_RADIUS`] of the last line containing `matched`.
fn locality_window(matched: &str, text: &str) -> Option<String> {
    if matched.trim().is_empty() {
        return None;
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let index = lines.iter().rposition(|line| line.contains(matched))?;
    let start = index.saturating_sub(WINDOW_RADIUS);
    let end = (index + WINDOW_RADIUS + 1).min(lines.len());

    Some(lines[start..end].join("\n"))
}

fn is_noisy(fragment: &str) -> bool {
    NUMERIC_NOISE.is_match(fragment)
        || fragment.contains('@')
        || fragment.contains("http")
        || fragment.contains("www")
}

fn is_stopword(word: &str) -> bool {
    NAME_STOPWORDS.contains(&word.to_lowercase().as_str())
}

/// Replace noisy tokens with a separator that breaks capitalized runs.
fn blank_noisy_tokens(line: &str) -> String {
    line.split_whitespace()
        .map(|token| if is_noisy(token) { "|" } else { token })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split each capitalized run at stopwords and keep the valid pieces.
fn collect_names(line: &str, names: &mut Vec<String>) {
    for run in CAPITALIZED_RUN.find_iter(line) {
        let words: Vec<&str> = run.as_str().split(' ').collect();

        for piece in words.split(|word| is_stopword(word)) {
            if piece.is_empty() {
                continue;
            }

            let name = piece[..piece.len().min(MAX_NAME_WORDS)].join(" ");
            if is_valid_name(&name) && !names.contains(&name) {
                names.push(name);
            }
        }
    }
}
