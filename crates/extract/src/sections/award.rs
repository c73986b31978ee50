//! Numbered award / accreditation rows (1-13).
//!
//! Each row is `<n>. <label> <value>`; the value runs to the end of the line
//! or to the next numbered row. Teaching institution may wrap across lines,
//! up to the next numbered line of any number or a blank line.

use std::sync::LazyLock;

use pdparse_core::AwardDetails;
use regex::Regex;

use super::{first_capture, Extraction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AwardField {
    Title,
    Mode,
    AwardingBody,
    JointAward,
    TeachingInstitution,
    DateProgramSpecs,
    DateApproval,
    NextReview,
    ApprovingBody,
    AccreditedBody,
    AccreditationGrade,
    AccreditationValidity,
    Benchmark,
}

impl AwardField {
    fn slot(self, award: &mut AwardDetails) -> &mut String {
        match self {
            AwardField::Title => &mut award.title,
            AwardField::Mode => &mut award.mode,
            AwardField::AwardingBody => &mut award.awarding_body,
            AwardField::JointAward => &mut award.joint_award,
            AwardField::TeachingInstitution => &mut award.teaching_institution,
            AwardField::DateProgramSpecs => &mut award.date_program_specs,
            AwardField::DateApproval => &mut award.date_approval,
            AwardField::NextReview => &mut award.next_review,
            AwardField::ApprovingBody => &mut award.approving_body,
            AwardField::AccreditedBody => &mut award.accredited_body,
            AwardField::AccreditationGrade => &mut award.accreditation_grade,
            AwardField::AccreditationValidity => &mut award.accreditation_validity,
            AwardField::Benchmark => &mut award.benchmark,
        }
    }

    fn name(self) -> &'static str {
        match self {
            AwardField::Title => "award.title",
            AwardField::Mode => "award.mode",
            AwardField::AwardingBody => "award.awarding_body",
            AwardField::JointAward => "award.joint_award",
            AwardField::TeachingInstitution => "award.teaching_institution",
            AwardField::DateProgramSpecs => "award.date_program_specs",
            AwardField::DateApproval => "award.date_approval",
            AwardField::NextReview => "award.next_review",
            AwardField::ApprovingBody => "award.approving_body",
            AwardField::AccreditedBody => "award.accredited_body",
            AwardField::AccreditationGrade => "award.accreditation_grade",
            AwardField::AccreditationValidity => "award.accreditation_validity",
            AwardField::Benchmark => "award.benchmark",
        }
    }
}

/// (row number, label alternation, field, value may wrap lines)
const ROWS: &[(u32, &str, AwardField, bool)] = &[
    (1, r"Title of (?:the )?Award", AwardField::Title, false),
    (2, r"Modes? of Study", AwardField::Mode, false),
    (3, r"Awarding Institution\s*/?\s*Body|Awarding Institution|Awarding Body", AwardField::AwardingBody, false),
    (4, r"Joint Award", AwardField::JointAward, false),
    (5, r"Teaching Institution", AwardField::TeachingInstitution, true),
    (6, r"Date of Program(?:me)? Specifications?", AwardField::DateProgramSpecs, false),
    (7, r"Date of Course Approval", AwardField::DateApproval, false),
    (8, r"Next Review Date", AwardField::NextReview, false),
    (9, r"Program(?:me)? Approving(?: Regulating)? Body", AwardField::ApprovingBody, false),
    (10, r"Program(?:me)? Accredited Body", AwardField::AccreditedBody, false),
    (11, r"Grade Awarded", AwardField::AccreditationGrade, false),
    (12, r"Program(?:me)? Accreditation Validity", AwardField::AccreditationValidity, false),
    (13, r"Program(?:me)? Benchmark", AwardField::Benchmark, false),
];

static ROW_PATTERNS: LazyLock<Vec<(AwardField, Regex)>> = LazyLock::new(|| {
    ROWS.iter()
        .map(|&(n, labels, field, wraps)| {
            let next = n + 1;
            let pattern = if wraps {
                format!(
                    r"(?is)(?:^|\s){n}\.\s*(?:{labels})[:\s]+(.+?)(?:\n\s*\d{{1,2}}\.\s*[a-z]|\n[ \t]*\n|\s{next}\.\s*[a-z]|$)"
                )
            } else {
                format!(r"(?i)(?:^|\s){n}\.\s*(?:{labels})[:\s]+(.+?)(?:\n|\s{next}\.\s*[a-z]|$)")
            };
            (field, Regex::new(&pattern).expect("award row regex"))
        })
        .collect()
});

pub fn extract_award(text: &str, university: &str) -> Extraction<AwardDetails> {
    let mut out = Extraction::new(AwardDetails::for_university(university));
    for (field, re) in ROW_PATTERNS.iter() {
        match first_capture(re, text) {
            Some(value) => *field.slot(&mut out.value) = value,
            None => out.miss(field.name()),
        }
    }
    out
}
