//! Identifier normalization.
//!
//! Turns free-text labels from the table into identifiers:
//!
//! | Function | Input | Output |
//! |----------|-------|--------|
//! | [`normalize_key`] | `"  not found  "` | `NOT_FOUND` |
//! | [`to_pascal_case`] | `"error_message"` | `ErrorMessage` |
//! | [`to_camel_case`] | `"error-message"` | `errorMessage` |
//! | [`to_snake_case`] | `"ErrorMessage"` | `error_message` |

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static WORD_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ _-]").expect("delimiter pattern is valid"));

/// Derive a row key from a free-text label.
///
/// Trims, collapses every whitespace run into one `_` and uppercases.
/// Returns `None` when nothing is left.
pub fn normalize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(WHITESPACE_RUN.replace_all(trimmed, "_").to_uppercase())
}

/// `error_message` / `error message` / `error-message` → `ErrorMessage`.
pub fn to_pascal_case(raw: &str) -> String {
    segments(raw).map(capitalize).collect()
}

/// `error_message` / `error message` / `error-message` → `errorMessage`.
pub fn to_camel_case(raw: &str) -> String {
    segments(raw)
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                decapitalize(segment)
            } else {
                capitalize(segment)
            }
        })
        .collect()
}

/// `ErrorMessage` / `error message` / `HTTPStatus` → `error_message` / `http_status`.
///
/// Used for file stems in languages whose module files are snake case.
pub fn to_snake_case(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for segment in segments(raw) {
        let chars: Vec<char> = segment.chars().collect();
        let mut word = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if c.is_uppercase() && !word.is_empty() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                    words.push(std::mem::take(&mut word));
                }
            }
            word.extend(c.to_lowercase());
        }
        if !word.is_empty() {
            words.push(word);
        }
    }
    words.join("_")
}

/// Whether `s` is a bare identifier: ASCII letter or `_` first, then ASCII
/// letters, digits or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn segments(raw: &str) -> impl Iterator<Item = &str> {
    WORD_DELIMITERS.split(raw).filter(|s| !s.is_empty())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn decapitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
