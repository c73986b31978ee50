//! The fixed-shape result of parsing one program document.
//!
//! Every field has a documented default so a document deserialized from
//! partial JSON, or produced from a PDF where nothing matched, still carries
//! the complete shape consumers expect.

use serde::{Deserialize, Serialize};

use crate::course::{ElectiveGroup, Semester};
use crate::error::PdError;

pub const DEFAULT_UNIVERSITY: &str = "GM University";

/// Program name used when the cover page has no `B.Tech in ...` line.
pub const DEFAULT_PROGRAM_NAME: &str = "Computer Science & Engineering";

/// Placeholder for award fields the document template leaves blank.
pub const PLACEHOLDER: &str = "---";

/// Semester slots every finished document carries, numbered from 1.
pub const MIN_SEMESTERS: u32 = 8;

/// Empty slots substituted when no PEOs / PSOs are found.
pub const OUTCOME_PLACEHOLDER_SLOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedDocument {
    pub details: ProgramDetails,
    pub award: AwardDetails,
    pub overview: String,
    pub peos: Vec<String>,
    pub pos: Vec<String>,
    pub psos: Vec<String>,
    pub credit_def: CreditDefinition,
    pub structure_table: Vec<StructureRow>,
    pub semesters: Vec<Semester>,
    pub prof_electives: Vec<ElectiveGroup>,
    pub open_electives: Vec<ElectiveGroup>,
    pub parsing_errors: Vec<ParsingError>,
    pub statistics: Statistics,
}

impl ParsedDocument {
    /// Default-shaped document attributed to the given institution.
    pub fn for_university(university: &str) -> Self {
        Self {
            details: ProgramDetails::for_university(university),
            award: AwardDetails::for_university(university),
            overview: String::new(),
            peos: Vec::new(),
            pos: Vec::new(),
            psos: Vec::new(),
            credit_def: CreditDefinition::default(),
            structure_table: Vec::new(),
            semesters: Vec::new(),
            prof_electives: Vec::new(),
            open_electives: Vec::new(),
            parsing_errors: Vec::new(),
            statistics: Statistics::default(),
        }
    }

    /// Deserialize caller-supplied JSON and apply [`normalize`](Self::normalize).
    ///
    /// Fields already present are kept; only missing ones take defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self, PdError> {
        let mut doc: ParsedDocument = serde_json::from_value(value)?;
        doc.normalize();
        Ok(doc)
    }

    /// Apply the post-assembly invariants.
    ///
    /// - `peos` / `psos` get placeholder slots when empty.
    /// - Semester numbers `1..=MIN_SEMESTERS` that are missing get empty
    ///   entries, so there are always at least eight. Extra semesters stay.
    /// - Semesters are sorted ascending by number (stable for duplicates).
    pub fn normalize(&mut self) {
        if self.peos.is_empty() {
            self.peos = vec![String::new(); OUTCOME_PLACEHOLDER_SLOTS];
        }
        if self.psos.is_empty() {
            self.psos = vec![String::new(); OUTCOME_PLACEHOLDER_SLOTS];
        }

        for sem_no in 1..=MIN_SEMESTERS {
            if !self.semesters.iter().any(|s| s.sem_no == sem_no) {
                self.semesters.push(Semester::empty(sem_no));
            }
        }
        self.semesters.sort_by_key(|s| s.sem_no);
    }

    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }

    pub fn total_credits(&self) -> u32 {
        self.semesters
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.total_credits()))
    }
}

impl Default for ParsedDocument {
    fn default() -> Self {
        let mut doc = Self::for_university(DEFAULT_UNIVERSITY);
        doc.normalize();
        doc
    }
}

// ── Program details ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramDetails {
    pub university: String,
    pub faculty: String,
    pub school: String,
    pub department: String,
    pub program_name: String,
    pub program_code: String,
    pub scheme_year: String,
    pub effective_ay: String,
    pub director: String,
    pub hod: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl ProgramDetails {
    pub fn for_university(university: &str) -> Self {
        Self {
            university: university.to_string(),
            faculty: String::new(),
            school: String::new(),
            department: String::new(),
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            program_code: String::new(),
            scheme_year: String::new(),
            effective_ay: String::new(),
            director: String::new(),
            hod: String::new(),
            contact_email: "hod.cse@gmu.edu".to_string(),
            contact_phone: "+91-1234567890".to_string(),
        }
    }
}

impl Default for ProgramDetails {
    fn default() -> Self {
        Self::for_university(DEFAULT_UNIVERSITY)
    }
}

// ── Award / accreditation ─────────────────────────────────────

/// Rows 1-13 of the award table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwardDetails {
    pub title: String,
    pub mode: String,
    pub awarding_body: String,
    pub joint_award: String,
    pub teaching_institution: String,
    pub date_program_specs: String,
    pub date_approval: String,
    pub next_review: String,
    pub approving_body: String,
    pub accredited_body: String,
    pub accreditation_grade: String,
    pub accreditation_validity: String,
    pub benchmark: String,
}

impl AwardDetails {
    pub fn for_university(university: &str) -> Self {
        Self {
            title: String::new(),
            mode: "Full Time".to_string(),
            awarding_body: university.to_string(),
            joint_award: "Not Applicable".to_string(),
            teaching_institution: format!("Faculty of Engineering and Technology, {university}"),
            date_program_specs: String::new(),
            date_approval: PLACEHOLDER.to_string(),
            next_review: PLACEHOLDER.to_string(),
            approving_body: PLACEHOLDER.to_string(),
            accredited_body: PLACEHOLDER.to_string(),
            accreditation_grade: PLACEHOLDER.to_string(),
            accreditation_validity: PLACEHOLDER.to_string(),
            benchmark: "N/A".to_string(),
        }
    }
}

impl Default for AwardDetails {
    fn default() -> Self {
        Self::for_university(DEFAULT_UNIVERSITY)
    }
}

// ── Credits ───────────────────────────────────────────────────

/// Credits awarded per stated weekly contact hours of L / T / P.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditDefinition {
    #[serde(rename = "L")]
    pub lecture: u32,
    #[serde(rename = "T")]
    pub tutorial: u32,
    #[serde(rename = "P")]
    pub practical: u32,
}

impl Default for CreditDefinition {
    fn default() -> Self {
        Self {
            lecture: 1,
            tutorial: 1,
            practical: 1,
        }
    }
}

/// One row of the programme structure (category -> credit allocation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRow {
    pub category: String,
    pub credits: u32,
    #[serde(default)]
    pub code: String,
}

// ── Diagnostics ───────────────────────────────────────────────

/// A recorded extraction failure. Never fatal to the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingError {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
    pub reason: String,
}

impl ParsingError {
    pub fn page(page: u32, reason: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            field: None,
            reason: reason.into(),
        }
    }

    pub fn document(reason: impl Into<String>) -> Self {
        Self {
            page: None,
            field: Some("Document".to_string()),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub pages_processed: usize,
    pub tables_found: usize,
    pub courses_found: usize,
    pub outcomes_found: usize,
    pub total_credits: u32,
}
