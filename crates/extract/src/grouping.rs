//! Page-level grouping of course tables into semesters and elective pools.
//!
//! The semester pass and the elective pass look at every page independently,
//! so a page can feed both and a course may appear twice.

use std::sync::LazyLock;

use pdparse_core::{Course, ElectiveGroup, ElectiveKind, Semester};
use regex::Regex;
use tracing::debug;

use crate::document::PageContent;
use crate::tables::{courses_on_page, CourseTableKind};

/// `Semester-3` / `Semester 3` on a core course page.
static SEMESTER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Semester[- ](\d+)").expect("semester label regex"));
/// `5th Semester` / `6 Semester` on an elective list page.
static ORDINAL_SEMESTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)(?:th|st|nd|rd)?\s*Semester").expect("ordinal semester regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouped {
    pub semesters: Vec<Semester>,
    pub prof_electives: Vec<ElectiveGroup>,
    pub open_electives: Vec<ElectiveGroup>,
    /// Course tables consumed by either pass.
    pub tables_used: usize,
}

impl Grouped {
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum::<usize>()
            + self
                .prof_electives
                .iter()
                .chain(&self.open_electives)
                .map(|g| g.courses.len())
                .sum::<usize>()
    }
}

pub fn group_pages(pages: &[PageContent]) -> Grouped {
    let mut grouped = Grouped::default();
    for page in pages {
        grouped.tables_used += semester_pass(page, &mut grouped.semesters);
        grouped.tables_used += elective_pass(page, &mut grouped);
    }
    grouped
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Semester number a core course page belongs to.
pub fn page_semester(text: &str) -> Option<u32> {
    if !text.to_lowercase().contains("semester") {
        return None;
    }
    capture_number(&SEMESTER_LABEL, text)
}

/// Elective pool and semester for a "List of ... Electives" page.
pub fn page_electives(text: &str) -> Option<(ElectiveKind, u32)> {
    let lower = text.to_lowercase();
    if !lower.contains("list of") || !lower.contains("elective") {
        return None;
    }
    let kind = if lower.contains("professional") {
        ElectiveKind::Professional
    } else if lower.contains("open") {
        ElectiveKind::Open
    } else {
        return None;
    };
    let sem = capture_number(&ORDINAL_SEMESTER, text)?;
    Some((kind, sem))
}

fn semester_pass(page: &PageContent, semesters: &mut Vec<Semester>) -> usize {
    let Some(sem_no) = page_semester(&page.text) else {
        return 0;
    };
    let Some(found) = courses_on_page(&page.tables, CourseTableKind::Semester) else {
        return 0;
    };
    debug!(page = page.page_number, sem_no, courses = found.courses.len(), "Semester courses");
    find_or_insert(semesters, |s| s.sem_no == sem_no, || Semester::empty(sem_no))
        .courses
        .extend(found.courses);
    found.tables
}

fn elective_pass(page: &PageContent, grouped: &mut Grouped) -> usize {
    let Some((kind, sem)) = page_electives(&page.text) else {
        return 0;
    };
    let Some(found) = courses_on_page(&page.tables, CourseTableKind::Elective) else {
        return 0;
    };
    debug!(page = page.page_number, kind = kind.label(), sem, courses = found.courses.len(), "Elective courses");
    let pool = match kind {
        ElectiveKind::Professional => &mut grouped.prof_electives,
        ElectiveKind::Open => &mut grouped.open_electives,
    };
    add_electives(pool, kind, sem, found.courses);
    found.tables
}

fn add_electives(pool: &mut Vec<ElectiveGroup>, kind: ElectiveKind, sem: u32, courses: Vec<Course>) {
    find_or_insert(pool, |g| g.sem == sem, || ElectiveGroup::new(kind, sem))
        .courses
        .extend(courses);
}

/// First element matching `pred`, appending `make()` when there is none.
fn find_or_insert<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool, make: impl FnOnce() -> T) -> &mut T {
    let idx = match items.iter().position(pred) {
        Some(idx) => idx,
        None => {
            items.push(make());
            items.len() - 1
        }
    };
    &mut items[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, text: &str, rows: &[&[&str]]) -> PageContent {
        PageContent {
            page_number: n,
            text: text.to_string(),
            tables: vec![rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect()],
        }
    }

    const HEADER: &[&str] = &["Course Code", "Course Title", "Credits"];

    #[test]
    fn semester_number_from_label() {
        assert_eq!(page_semester("Semester-3\nCourses"), Some(3));
        assert_eq!(page_semester("SEMESTER 12"), Some(12));
        assert_eq!(page_semester("Semesters overview"), None);
        assert_eq!(page_semester("no label"), None);
    }

    #[test]
    fn elective_page_kind_and_semester() {
        assert_eq!(
            page_electives("List of Professional Electives\n5th Semester"),
            Some((ElectiveKind::Professional, 5))
        );
        assert_eq!(
            page_electives("LIST OF OPEN ELECTIVES offered in 6 Semester"),
            Some((ElectiveKind::Open, 6))
        );
        assert_eq!(page_electives("List of Electives 5th Semester"), None);
        assert_eq!(page_electives("Professional Electives 5th Semester"), None);
        assert_eq!(page_electives("List of Open Electives"), None);
    }

    #[test]
    fn pages_of_one_semester_merge() {
        let pages = vec![
            page(1, "Semester-3", &[HEADER, &["UE24CS3001", "Data Structures", "4"]]),
            page(2, "Semester-1", &[HEADER, &["UE24CS1001", "Calculus", "4"]]),
            page(3, "Semester-3 (contd.)", &[HEADER, &["UE24CS3002", "Discrete Maths", "3"]]),
        ];
        let grouped = group_pages(&pages);
        assert_eq!(grouped.semesters.len(), 2);
        assert_eq!(grouped.semesters[0].sem_no, 3);
        assert_eq!(grouped.semesters[0].courses.len(), 2);
        assert_eq!(grouped.semesters[1].sem_no, 1);
        assert_eq!(grouped.tables_used, 3);
    }

    #[test]
    fn semester_page_without_course_table_adds_nothing() {
        let pages = vec![page(1, "Semester-4", &[&["a", "b"], &["c", "d"]])];
        let grouped = group_pages(&pages);
        assert!(grouped.semesters.is_empty());
        assert_eq!(grouped.tables_used, 0);
    }

    #[test]
    fn elective_groups_reuse_first_match() {
        let pages = vec![
            page(4, "List of Professional Electives\n5th Semester", &[HEADER, &["UE24CS5011", "Cloud Computing", ""]]),
            page(5, "List of Professional Electives\n5th Semester", &[HEADER, &["UE24CS5012", "Blockchain", "4"]]),
            page(6, "List of Open Electives\n6th Semester", &[HEADER, &["UE24CS6051", "IoT", "3"]]),
        ];
        let grouped = group_pages(&pages);
        assert_eq!(grouped.prof_electives.len(), 1);
        let prof = &grouped.prof_electives[0];
        assert_eq!(prof.title, "Professional Electives - Semester 5");
        assert_eq!(prof.courses.len(), 2);
        assert_eq!(prof.courses[0].credits, 3);
        assert_eq!(prof.courses[1].credits, 4);
        assert_eq!(grouped.open_electives.len(), 1);
        assert_eq!(grouped.open_electives[0].sem, 6);
        assert_eq!(grouped.course_count(), 3);
    }

    #[test]
    fn elective_page_can_also_feed_semester_pass() {
        let pages = vec![page(
            7,
            "List of Professional Electives Semester-5",
            &[HEADER, &["UE24CS5011", "Cloud Computing", "3"]],
        )];
        let grouped = group_pages(&pages);
        assert_eq!(grouped.semesters.len(), 1);
        assert_eq!(grouped.semesters[0].sem_no, 5);
        // "Semester-5" has no number before it, so no elective group.
        assert!(grouped.prof_electives.is_empty());
    }
}
