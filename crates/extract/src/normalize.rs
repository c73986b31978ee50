//! Whitespace cleanup for extracted text fragments.

/// Collapse every run of whitespace (including newlines) to a single space.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a cell that holds only ASCII digits.
pub fn parse_count(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Lowercase with all whitespace removed, for spacing-insensitive label checks.
pub fn squash(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(clean_text("  Data\n  Structures\t and\r\nAlgorithms "), "Data Structures and Algorithms");
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text(" \n\t "), "");
    }

    #[test]
    fn parse_count_accepts_digits_only() {
        assert_eq!(parse_count(" 4 "), Some(4));
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("4.0"), None);
        assert_eq!(parse_count("3-0-1"), None);
        assert_eq!(parse_count(""), None);
    }

    #[test]
    fn squash_ignores_case_and_spacing() {
        assert_eq!(squash("Course  Code"), "coursecode");
        assert_eq!(squash("COURSE\nTITLE"), "coursetitle");
    }
}
