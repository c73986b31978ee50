//! Credit structure summary: `Sl. No. | Program Category | Credits` rows.

use std::sync::LazyLock;

use pdparse_core::StructureRow;
use regex::Regex;

use super::{bounded_body, Extraction};
use crate::normalize::{clean_text, parse_count};

static START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Sl\.\s*No\.?\s*Program\s*-?\s*Category\s+Credits").expect("structure start regex")
});
static END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Semester|Total").expect("structure end regex"));

/// `2. Technical Competency 10 (SDTCD)` on a single line.
static STRICT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.\s+(.*?)\s+(\d+)(?:\s*\(([^)]+)\))?\s*$").expect("structure row regex")
});
static ITEM_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)\d+\.\s").expect("structure item regex"));
/// One numbered item whose category may wrap across lines.
static LENIENT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*(.+?)\s*(\d+)\s*(?:\(([^)]+)\))?\s*$").expect("structure chunk regex")
});

fn row(category: &str, credits: &str, code: Option<&str>) -> Option<StructureRow> {
    let category = clean_text(category);
    if category.is_empty() {
        return None;
    }
    Some(StructureRow {
        category,
        credits: parse_count(credits).unwrap_or(0),
        code: code.map(|c| c.trim().to_string()).unwrap_or_default(),
    })
}

fn strict_rows(body: &str) -> Vec<StructureRow> {
    body.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .filter_map(|line| STRICT_ROW.captures(line))
        .filter_map(|caps| {
            row(
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str()),
                caps.get(4).map(|m| m.as_str()),
            )
        })
        .collect()
}

fn lenient_rows(body: &str) -> Vec<StructureRow> {
    let starts: Vec<_> = ITEM_START.find_iter(body).map(|m| (m.start(), m.end())).collect();
    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, content))| {
            let stop = starts.get(i + 1).map_or(body.len(), |&(next, _)| next);
            let caps = LENIENT_ROW.captures(&body[content..stop])?;
            row(
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map(|m| m.as_str()),
            )
        })
        .collect()
}

/// Rows in source order. A strict one-row-per-line pass runs first; when it
/// finds nothing, wrapped rows are recovered by splitting on item numbers.
pub fn extract_structure(text: &str) -> Extraction<Vec<StructureRow>> {
    let Some(body) = bounded_body(text, &START, &END) else {
        let mut out = Extraction::new(Vec::new());
        out.miss("structure_table");
        return out;
    };

    let mut rows = strict_rows(body);
    if rows.is_empty() {
        rows = lenient_rows(body);
    }
    let mut out = Extraction::new(rows);
    if out.value.is_empty() {
        out.miss("structure_table");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_line() {
        let text = "Sl. No. Program -Category Credits\n\
            1. Program-Core courses, elective Courses, open electives 130\n\
            2. Technical Competency 10 (SDTCD)\n\
            3. Internship 2 (INT)\n\
            Total 142";
        let rows = extract_structure(text).value;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].category, "Program-Core courses, elective Courses, open electives");
        assert_eq!(rows[0].credits, 130);
        assert_eq!(rows[0].code, "");
        assert_eq!(rows[1].code, "SDTCD");
        assert_eq!(rows[2].credits, 2);
    }

    #[test]
    fn wrapped_rows_use_lenient_pass() {
        let text = "Sl. No. Program Category Credits\n\
            1. Program-Core courses,\nelective courses 130\n\
            2. Technical\nCompetency 10 (SDTCD)\n\
            Semester-1";
        let rows = extract_structure(text).value;
        assert_eq!(
            rows,
            vec![
                StructureRow {
                    category: "Program-Core courses, elective courses".into(),
                    credits: 130,
                    code: String::new(),
                },
                StructureRow {
                    category: "Technical Competency".into(),
                    credits: 10,
                    code: "SDTCD".into(),
                },
            ]
        );
    }

    #[test]
    fn missing_table_is_a_miss() {
        let out = extract_structure("no summary here");
        assert!(out.value.is_empty());
        assert_eq!(out.misses, vec!["structure_table"]);
    }
}
