//! PEOs, POs and PSOs: numbered statements inside their named sections.
//!
//! Items are kept in source order, one per coded header (`PEO-3:`). The
//! rendered strings carry the title in bold the way the editor stores them.

use std::sync::LazyLock;

use pdparse_core::OUTCOME_PLACEHOLDER_SLOTS;
use regex::Regex;

use super::{bounded, Extraction};
use crate::normalize::clean_text;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("outcome regex")
}

static PEO_START: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)Program(?:me)? Educational Objectives"));
static PEO_END: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)(?:\d{1,2}\.\s*)?Program(?:me)? (?:Outcomes|Specific)"));
static PEO_HEADER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bPEO[-\s]?\d+[ \t]*[:.][ \t]*([^\n]*)"));

static PO_START: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)Program(?:me)? Outcomes"));
static PO_END: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?:\d{1,2}\.\s*)?Program(?:me)? Specific"));
static PO_HEADER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bPO[-\s]?\d+\s*:"));

static PSO_START: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)Program(?:me)? Specific Outcomes"));
static PSO_END: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(?:\d{1,2}\.\s*)?(?:Program(?:me)? Structure|Definition of Credit|Courses and Credits)")
});
static PSO_HEADER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bPSO[-\s]?\d+[ \t]*[:.][ \t]*([^\n]*)"));

/// A header match and the text up to the next header.
struct Item<'a> {
    /// Capture 1 of the header, when the header pattern has one.
    title: &'a str,
    body: &'a str,
}

fn items<'a>(section: &'a str, header: &Regex) -> Vec<Item<'a>> {
    let headers: Vec<_> = header.captures_iter(section).collect();
    headers
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
            let next = headers
                .get(i + 1)
                .and_then(|c| c.get(0))
                .map(|m| m.start())
                .unwrap_or(section.len());
            Item {
                title: caps.get(1).map(|m| m.as_str()).unwrap_or(""),
                body: &section[whole.1..next],
            }
        })
        .collect()
}

/// `<b>Title</b><br/>Description`
fn titled_block(item: &Item<'_>) -> Option<String> {
    let title = clean_text(item.title);
    let body = clean_text(item.body);
    if title.is_empty() && body.is_empty() {
        return None;
    }
    Some(format!("<b>{title}</b><br/>{body}"))
}

/// `<b>Title</b>: Description`, split at the first colon after the code.
fn inline_titled(item: &Item<'_>) -> Option<String> {
    let text = clean_text(item.body);
    if text.is_empty() {
        return None;
    }
    match text.split_once(':') {
        Some((title, desc)) => Some(format!("<b>{}</b>: {}", title.trim(), desc.trim())),
        None => Some(text),
    }
}

fn with_placeholders(mut out: Extraction<Vec<String>>, field: &'static str) -> Extraction<Vec<String>> {
    if out.value.is_empty() {
        out.value = vec![String::new(); OUTCOME_PLACEHOLDER_SLOTS];
        out.miss(field);
    }
    out
}

pub fn extract_peos(text: &str) -> Extraction<Vec<String>> {
    let value = bounded(text, &PEO_START, &PEO_END)
        .map(|section| items(section, &PEO_HEADER).iter().filter_map(titled_block).collect())
        .unwrap_or_default();
    with_placeholders(Extraction::new(value), "peos")
}

/// No placeholder fallback: consumers substitute the standard POs.
pub fn extract_pos(text: &str) -> Extraction<Vec<String>> {
    let value: Vec<String> = bounded(text, &PO_START, &PO_END)
        .map(|section| items(section, &PO_HEADER).iter().filter_map(inline_titled).collect())
        .unwrap_or_default();
    let mut out = Extraction::new(value);
    if out.value.is_empty() {
        out.miss("pos");
    }
    out
}

pub fn extract_psos(text: &str) -> Extraction<Vec<String>> {
    let value = bounded(text, &PSO_START, &PSO_END)
        .map(|section| items(section, &PSO_HEADER).iter().filter_map(titled_block).collect())
        .unwrap_or_default();
    with_placeholders(Extraction::new(value), "psos")
}
