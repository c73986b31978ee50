use std::sync::LazyLock;

use pdparse_core::Course;
use regex::Regex;

use super::CourseTableKind;
use crate::normalize::{clean_text, parse_count};

/// `UE` + intake year + department + serial, e.g. `UE24CS3001`.
static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^UE\d{2}[A-Z]{2}\d{4}$").expect("course code regex"));

/// Non-template codes used for mandatory non-credit components.
const SPECIAL_CODES: &[&str] = &["SDTCD", "CASP", "CIBI", "SA", "SASP"];

impl CourseTableKind {
    fn accepts(self, cell: &str) -> bool {
        COURSE_CODE.is_match(cell)
            || (self == CourseTableKind::Semester && SPECIAL_CODES.contains(&cell))
    }
}

/// One course from a table row.
///
/// The title is the cell right after the code. Credits are the last
/// numeric-only cell anywhere in the row, scanning from the row's end, so a
/// leading serial number counts when nothing follows it. Rows with no
/// numeric cell take the kind's fallback.
pub fn parse_row(row: &[String], kind: CourseTableKind) -> Option<Course> {
    if row.len() < 2 {
        return None;
    }
    let cells: Vec<&str> = row.iter().map(|c| c.trim()).collect();
    let code_idx = cells.iter().position(|cell| kind.accepts(cell))?;

    let title = cells.get(code_idx + 1).map(|t| clean_text(t)).unwrap_or_default();
    let credits = cells
        .iter()
        .rev()
        .find_map(|cell| parse_count(cell))
        .unwrap_or_else(|| kind.default_credits());

    Some(Course::new(cells[code_idx], title, credits))
}
