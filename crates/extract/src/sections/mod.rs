//! Section extractors over the concatenated document text.
//!
//! Each extractor is a pure function from text to an [`Extraction`]: the
//! value it found (or its documented default) plus the names of the fields it
//! could not locate. Nothing here fails; a miss only leaves a default.

pub mod award;
pub mod credits;
pub mod metadata;
pub mod outcomes;
pub mod overview;
pub mod structure;

use regex::Regex;

/// Output of one extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub value: T,
    /// Fields that kept their default.
    pub misses: Vec<&'static str>,
}

impl<T> Extraction<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            misses: Vec::new(),
        }
    }

    pub fn miss(&mut self, field: &'static str) {
        self.misses.push(field);
    }
}

/// Substring from the first `start` match up to the next `end` match.
///
/// Runs to end-of-text when no end anchor follows the start.
pub fn bounded<'a>(text: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let head = start.find(text)?;
    let tail = &text[head.end()..];
    let stop = end.find(tail).map(|m| m.start()).unwrap_or(tail.len());
    Some(&text[head.start()..head.end() + stop])
}

/// Like [`bounded`] but excludes the start anchor itself.
pub fn bounded_body<'a>(text: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let head = start.find(text)?;
    let tail = &text[head.end()..];
    let stop = end.find(tail).map(|m| m.start()).unwrap_or(tail.len());
    Some(&tail[..stop])
}

/// First capture group of the first match, whitespace-collapsed.
pub fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| crate::normalize::clean_text(m.as_str()))
        .filter(|s| !s.is_empty())
}
