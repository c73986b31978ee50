//! Opt-in shape checks on caller-supplied document JSON.
//!
//! This looks only at presence and basic types. It does not compare totals
//! across sections or re-run any extraction.

use serde::Serialize;
use serde_json::Value;

/// Dotted paths that must exist. An empty value is only a warning.
pub const REQUIRED_FIELDS: &[&str] = &[
    "details.program_name",
    "details.scheme_year",
    "details.faculty",
    "details.department",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub statistics: ValidationStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStatistics {
    pub total_courses: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

pub fn validate(data: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for path in REQUIRED_FIELDS {
        match lookup(data, path) {
            None => errors.push(format!("Missing required field: {path}")),
            Some(value) if is_empty(value) => warnings.push(format!("Empty value for field: {path}")),
            Some(_) => {}
        }
    }

    if let Some(credit_def) = data.get("credit_def") {
        let numeric = match credit_def {
            Value::Object(map) => map.values().all(Value::is_number),
            _ => false,
        };
        if !numeric {
            errors.push("Credit definitions must be numeric".to_string());
        }
    }

    let mut total_courses = 0;
    for (label, courses) in course_lists(data) {
        total_courses += courses.len();
        for course in courses {
            if !has_text(course, "code") || !has_text(course, "title") {
                warnings.push(format!("Course missing code or title in semester {label}"));
            }
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        statistics: ValidationStatistics {
            total_courses,
            total_errors: errors.len(),
            total_warnings: warnings.len(),
        },
        errors,
        warnings,
    }
}

/// Resolve a dotted path. `details` also answers to the older `metadata` key.
fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let root = parts.next()?;
    let mut current = data.get(root).or_else(|| match root {
        "details" => data.get("metadata"),
        _ => None,
    })?;
    for part in parts {
        current = current.get(part)?;
    }
    Some(current)
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

fn has_text(course: &Value, key: &str) -> bool {
    course
        .get(key)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Course arrays labelled by semester, from `semesters[*].courses` and from a
/// legacy `courses` object keyed by semester.
fn course_lists(data: &Value) -> Vec<(String, &Vec<Value>)> {
    let mut lists = Vec::new();
    if let Some(semesters) = data.get("semesters").and_then(Value::as_array) {
        for (i, sem) in semesters.iter().enumerate() {
            let label = sem
                .get("sem_no")
                .map(|n| n.to_string())
                .unwrap_or_else(|| (i + 1).to_string());
            if let Some(courses) = sem.get("courses").and_then(Value::as_array) {
                lists.push((label, courses));
            }
        }
    }
    if let Some(by_sem) = data.get("courses").and_then(Value::as_object) {
        for (sem, courses) in by_sem {
            if let Some(courses) = courses.as_array() {
                lists.push((sem.clone(), courses));
            }
        }
    }
    lists
}
