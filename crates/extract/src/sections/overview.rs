use std::sync::LazyLock;

use regex::Regex;

use super::{bounded_body, Extraction};
use crate::normalize::clean_text;

/// `14. Program Overview` heading line; the body starts on the next line.
static START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\.\s*Program(?:me)? Overview[^\n]*\n").expect("overview start regex")
});
static END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n\s*\d{1,2}\.\s*Program(?:me)?\b|Program(?:me)? Educational Objectives")
        .expect("overview end regex")
});

pub fn extract_overview(text: &str) -> Extraction<String> {
    let mut out = Extraction::new(String::new());
    match bounded_body(text, &START, &END).map(clean_text) {
        Some(body) if !body.is_empty() => out.value = body,
        _ => out.miss("overview"),
    }
    out
}
