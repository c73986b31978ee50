//! Program details block: institution, faculty, school, department, people.

use std::sync::LazyLock;

use pdparse_core::{ProgramDetails, DEFAULT_PROGRAM_NAME};
use regex::Regex;

use super::{first_capture, Extraction};
use crate::normalize::clean_text;

static FACULTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Faculty\s+(.+?)(?:\n|School|$)").expect("faculty regex"));
static SCHOOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)School\s+(.+?)(?:\n|Department|$)").expect("school regex"));
static DEPARTMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Department\s+(.+?)(?:\n|Program|$)").expect("department regex"));
static DIRECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Director of School\s+(.+?)(?:\n|Head|$)").expect("director regex")
});
static HOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Head of Department\s+(.+?)(?:\n|\d+\.|$)").expect("hod regex")
});
static PROGRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)B\.\s?Tech\.?\s+in\s+([^\n]+)").expect("program regex"));
static PROGRAM_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]{2,4}\s*\d{3,4})\b").expect("program code regex"));
static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{4})[\-\s]*(?:SCHEMES?|CURRICULUM)").expect("scheme regex")
});
static INSTITUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\D.*?\b(?:UNIVERSITY|INSTITUTE))\b").expect("institution regex")
});

/// Cover-page lines searched for the institution name.
const COVER_LINES: usize = 15;
const MAX_INSTITUTION_WORDS: usize = 6;
/// Characters after the program name searched for a program code.
const PROGRAM_CODE_WINDOW: usize = 50;

pub fn extract_details(text: &str, university: &str) -> Extraction<ProgramDetails> {
    let mut out = Extraction::new(ProgramDetails::for_university(university));
    let details = &mut out.value;
    let mut misses = Vec::new();

    if let Some(name) = find_institution(text) {
        details.university = name;
    }

    let simple: [(&LazyLock<Regex>, &mut String, &'static str); 5] = [
        (&FACULTY, &mut details.faculty, "details.faculty"),
        (&SCHOOL, &mut details.school, "details.school"),
        (&DEPARTMENT, &mut details.department, "details.department"),
        (&DIRECTOR, &mut details.director, "details.director"),
        (&HOD, &mut details.hod, "details.hod"),
    ];
    for (re, slot, name) in simple {
        match first_capture(re, text) {
            Some(value) => *slot = value,
            None => misses.push(name),
        }
    }

    match PROGRAM.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map(|m| m.end()).unwrap_or(0);
            details.program_name = caps.get(1).map(|m| clean_text(m.as_str())).unwrap_or_default();
            let window: String = text[whole..].chars().take(PROGRAM_CODE_WINDOW).collect();
            if let Some(code) = first_capture(&PROGRAM_CODE, &window) {
                details.program_code = code;
            }
        }
        None => misses.push("details.program_name"),
    }

    match SCHEME.captures(text).and_then(|caps| caps.get(1)) {
        Some(year) => {
            details.scheme_year = year.as_str().to_string();
            if let Ok(y) = year.as_str().parse::<u32>() {
                details.effective_ay = format!("{}-{:02}", y, (y + 1) % 100);
            }
        }
        None => misses.push("details.scheme_year"),
    }

    out.misses = misses;
    out
}

fn find_institution(text: &str) -> Option<String> {
    text.lines()
        .take(COVER_LINES)
        .filter_map(|line| first_capture(&INSTITUTION, line))
        .find(|name| name.split_whitespace().count() <= MAX_INSTITUTION_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COVER: &str = "GM UNIVERSITY\n\
        2024 Scheme\n\
        Faculty Engineering and Technology\n\
        School Computer Science\n\
        Department Computer Science and Engineering\n\
        Program B.Tech. in Computer Science & Engineering\n\
        Director of School Dr. A. Kumar\n\
        Head of Department Dr. B. Rao\n\
        1. Title of the Award B.Tech\n";

    #[test]
    fn extracts_cover_page_fields() {
        let out = extract_details(COVER, "GM University");
        let d = &out.value;
        assert_eq!(d.university, "GM UNIVERSITY");
        assert_eq!(d.faculty, "Engineering and Technology");
        assert_eq!(d.school, "Computer Science");
        assert_eq!(d.department, "Computer Science and Engineering");
        assert_eq!(d.program_name, "Computer Science & Engineering");
        assert_eq!(d.director, "Dr. A. Kumar");
        assert_eq!(d.hod, "Dr. B. Rao");
        assert_eq!(d.scheme_year, "2024");
        assert_eq!(d.effective_ay, "2024-25");
        assert!(out.misses.is_empty(), "misses: {:?}", out.misses);
    }

    #[test]
    fn empty_text_keeps_defaults() {
        let out = extract_details("", "Test University");
        assert_eq!(out.value, ProgramDetails::for_university("Test University"));
        assert!(out.misses.contains(&"details.program_name"));
        assert_eq!(out.value.program_name, DEFAULT_PROGRAM_NAME);
        assert!(out.misses.contains(&"details.faculty"));
        assert_eq!(out.misses.len(), 7);
    }

    #[test]
    fn effective_year_wraps_century() {
        let out = extract_details("2099 CURRICULUM", "X");
        assert_eq!(out.value.effective_ay, "2099-00");
    }
}
