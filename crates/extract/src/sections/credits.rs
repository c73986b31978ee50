use std::sync::LazyLock;

use pdparse_core::CreditDefinition;
use regex::Regex;

use super::{bounded, Extraction};

static SECTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Definition of Credit").expect("credit section regex"));
static SECTION_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\d{1,2}\.\s*)?(?:Program(?:me)? Structure|Sl\.\s*No|Semester)")
        .expect("credit section end regex")
});

fn credit_rule(kind: &str) -> Regex {
    Regex::new(&format!(r"(?is)(\d+)\s*Hrs?\.?\s*{kind}.*?(\d+)\s*Credits?"))
        .expect("credit rule regex")
}

static LECTURE: LazyLock<Regex> = LazyLock::new(|| credit_rule("Lecture"));
static TUTORIAL: LazyLock<Regex> = LazyLock::new(|| credit_rule("Tutorial"));
static PRACTICAL: LazyLock<Regex> = LazyLock::new(|| credit_rule("Practical"));

/// Credits stated for one weekly contact hour of the kind, or `None` when
/// absent or zero.
fn rule(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
        .filter(|&credits: &u32| credits > 0)
}

/// L/T/P credit definition from lines like `1 Hr. Lecture (L) per week
/// 1 Credit`. Searched inside the "Definition of Credit" section first, then
/// anywhere in the document.
pub fn extract_credit_def(text: &str) -> Extraction<CreditDefinition> {
    let section = bounded(text, &SECTION_START, &SECTION_END);
    let lookup = |re: &Regex| section.and_then(|s| rule(re, s)).or_else(|| rule(re, text));

    let mut out = Extraction::new(CreditDefinition::default());
    let slots: [(&LazyLock<Regex>, &mut u32, &'static str); 3] = [
        (&LECTURE, &mut out.value.lecture, "credit_def.L"),
        (&TUTORIAL, &mut out.value.tutorial, "credit_def.T"),
        (&PRACTICAL, &mut out.value.practical, "credit_def.P"),
    ];
    let mut misses = Vec::new();
    for (re, slot, name) in slots {
        match lookup(re) {
            Some(credits) => *slot = credits,
            None => misses.push(name),
        }
    }
    out.misses = misses;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_credit_per_contact_hour() {
        let text = "18. Definition of Credit\n\
            1 Hr. Lecture (L) per week 1 Credit\n\
            2 Hr. Tutorial (T) per week 1 Credit\n\
            2 Hrs. Practical (P) per week 2 Credits\n\
            19. Program Structure";
        let out = extract_credit_def(text);
        assert_eq!(
            out.value,
            CreditDefinition {
                lecture: 1,
                tutorial: 1,
                practical: 2
            }
        );
        assert!(out.misses.is_empty());
    }

    #[test]
    fn falls_back_to_whole_text() {
        let text = "Notes: 3 Hr Practical per week equals 2 Credit";
        let out = extract_credit_def(text);
        assert_eq!(out.value.practical, 2);
        assert_eq!(out.value.lecture, 1);
        assert_eq!(out.misses, vec!["credit_def.L", "credit_def.T"]);
    }

    #[test]
    fn zero_credits_are_ignored() {
        let out = extract_credit_def("1 Hr Lecture 0 Credit");
        assert_eq!(out.value.lecture, 1);
        assert!(out.misses.contains(&"credit_def.L"));
    }

    #[test]
    fn empty_text_defaults_to_one_each() {
        let out = extract_credit_def("");
        assert_eq!(out.value, CreditDefinition::default());
        assert_eq!(out.misses.len(), 3);
    }
}
