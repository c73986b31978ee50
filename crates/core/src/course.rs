use serde::{Deserialize, Serialize};

pub const DEFAULT_COURSE_TYPE: &str = "Theory";
pub const DEFAULT_COURSE_CATEGORY: &str = "Core";

/// A single course row pulled out of a semester or elective table.
///
/// The code is the identity, but duplicates are kept as found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(rename = "type", default = "default_course_type")]
    pub course_type: String,
    #[serde(default = "default_course_category")]
    pub category: String,
}

impl Course {
    pub fn new(code: impl Into<String>, title: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            credits,
            course_type: DEFAULT_COURSE_TYPE.to_string(),
            category: DEFAULT_COURSE_CATEGORY.to_string(),
        }
    }
}

fn default_course_type() -> String {
    DEFAULT_COURSE_TYPE.to_string()
}

fn default_course_category() -> String {
    DEFAULT_COURSE_CATEGORY.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub sem_no: u32,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Semester {
    pub fn empty(sem_no: u32) -> Self {
        Self {
            sem_no,
            courses: Vec::new(),
        }
    }

    /// Saturates instead of overflowing on absurd credit cells.
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.credits))
    }
}

/// Which elective pool a page of electives belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectiveKind {
    Professional,
    Open,
}

impl ElectiveKind {
    pub fn label(&self) -> &'static str {
        match self {
            ElectiveKind::Professional => "Professional",
            ElectiveKind::Open => "Open",
        }
    }

    /// Display title for a group, e.g. "Open Electives - Semester 6".
    pub fn group_title(&self, sem: u32) -> String {
        format!("{} Electives - Semester {}", self.label(), sem)
    }
}

/// Pool of optional courses offered in one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveGroup {
    pub sem: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl ElectiveGroup {
    pub fn new(kind: ElectiveKind, sem: u32) -> Self {
        Self {
            sem,
            title: kind.group_title(sem),
            courses: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_type_serializes_as_type() {
        let course = Course::new("UE24CS3001", "Data Structures", 4);
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["type"], "Theory");
        assert_eq!(json["category"], "Core");
        assert_eq!(json["credits"], 4);
    }

    #[test]
    fn course_defaults_when_fields_missing() {
        let course: Course = serde_json::from_str(r#"{"code":"UE24CS3001","title":"DS"}"#).unwrap();
        assert_eq!(course.credits, 0);
        assert_eq!(course.course_type, "Theory");
        assert_eq!(course.category, "Core");
    }

    #[test]
    fn elective_group_title() {
        let group = ElectiveGroup::new(ElectiveKind::Professional, 5);
        assert_eq!(group.title, "Professional Electives - Semester 5");
        assert!(group.courses.is_empty());
    }

    #[test]
    fn semester_credit_total() {
        let mut sem = Semester::empty(1);
        sem.courses.push(Course::new("UE24CS1001", "A", 4));
        sem.courses.push(Course::new("UE24CS1002", "B", 3));
        assert_eq!(sem.total_credits(), 7);
    }

    #[test]
    fn semester_credit_total_saturates() {
        let mut sem = Semester::empty(1);
        sem.courses.push(Course::new("UE24CS1001", "A", 4_000_000_000));
        sem.courses.push(Course::new("UE24CS1002", "B", 4_000_000_000));
        assert_eq!(sem.total_credits(), u32::MAX);
    }
}
