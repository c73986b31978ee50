//! Course-table classification.
//!
//! A table counts as a course table when one of its first rows carries both a
//! "course code" and a "course title" label. Every row after that header is a
//! candidate course: rows without a recognizable code are skipped silently.

mod row;


use pdparse_core::Course;

use crate::document::Table;
use crate::normalize::squash;

pub use row::parse_row;

/// Rows at the top of a table searched for the header.
const HEADER_SCAN_ROWS: usize = 3;

/// Which table family a row belongs to; decides accepted codes and the
/// credit fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseTableKind {
    /// Per-semester core course tables.
    Semester,
    /// Lists of professional or open electives.
    Elective,
}

impl CourseTableKind {
    /// Credits assumed when a row has no numeric-only cell.
    pub fn default_credits(self) -> u32 {
        match self {
            CourseTableKind::Semester => 0,
            CourseTableKind::Elective => 3,
        }
    }
}

/// Index of the header row, if the table is a course table.
pub fn header_row(table: &Table) -> Option<usize> {
    table.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let joined = squash(&row.join(" "));
        joined.contains("coursecode") && joined.contains("coursetitle")
    })
}

/// Courses in one table, or `None` when it has no course header.
pub fn courses_in(table: &Table, kind: CourseTableKind) -> Option<Vec<Course>> {
    let header = header_row(table)?;
    Some(
        table[header + 1..]
            .iter()
            .filter_map(|row| parse_row(row, kind))
            .collect(),
    )
}

/// Courses from every course table on a page, in table order.
///
/// Returns `None` when no table on the page is a course table.
pub fn courses_on_page(tables: &[Table], kind: CourseTableKind) -> Option<PageCourses> {
    let mut found: Option<PageCourses> = None;
    for table in tables {
        if let Some(courses) = courses_in(table, kind) {
            let page = found.get_or_insert_with(PageCourses::default);
            page.tables += 1;
            page.courses.extend(courses);
        }
    }
    found
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCourses {
    pub courses: Vec<Course>,
    /// Course tables that contributed.
    pub tables: usize,
}
