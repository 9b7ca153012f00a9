// ABOUTME: Field-level heuristics: deadline regex ladder, editor-name cleaning, metadata-line detection.
// ABOUTME: Operates on flattened text only; DOM concerns stay in the section walk and variants.

//! Field extractors.
//!
//! Key behaviors:
//! - Deadline patterns are tried in priority order; labeled prefixes win over
//!   the bare date pattern; the first capturing-group match is returned.
//! - `extract_pure_name` truncates at the first affiliation/title indicator
//!   and rejects the input outright when the indicator sits at the start.
//! - `is_metadata_line` flags short label/date fragments so they are not
//!   misclassified as description content.

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::normalize_whitespace;

/// Date token grammar: 1-2 digit day, month name of at least 3 letters, 4-digit year.
const DATE_TOKEN: &str = r"(\d{1,2}\s+[A-Za-z]{3,}\s+\d{4})";

/// Deadline patterns in priority order: explicit labels first, bare date last.
static DEADLINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(&format!(
            r"(?i)(?:submission\s+deadline|deadline)\s*:?\s*{}",
            DATE_TOKEN
        ))
        .unwrap(),
        Regex::new(&format!(r"(?i)due\s*:?\s*{}", DATE_TOKEN)).unwrap(),
        Regex::new(&format!(r"(?i)submission\s*:?\s*{}", DATE_TOKEN)).unwrap(),
        Regex::new(
            r"(?i)\b(\d{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4})\b",
        )
        .unwrap(),
    ]
});

/// Bare date token, used by `is_metadata_line`.
static DATE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}\s+[A-Za-z]{3,}\s+\d{4}").unwrap());

/// Affiliation/title substrings that end (or disqualify) a name.
const STOP_INDICATORS: &[&str] = &[
    "department",
    "university",
    "school",
    "institute",
    "center",
    "centre",
    "college",
    "faculty",
    "lead",
    "principal",
    "chair",
    "lecturer",
    "reader",
    "email",
    " at ",
    " of ",
    "head",
    "affiliation",
    "areas",
    "expertise",
    "interests",
];

static STOP_INDICATOR_AC: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(MatchKind::LeftmostFirst)
        .build(STOP_INDICATORS)
        .expect("stop indicator automaton")
});

static HONORIFIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(professor|prof|dr|associate|assistant)\b\.?").unwrap());

static TRAILING_ROLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(professor|prof|lecturer|reader|chair)\b").unwrap());

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").unwrap());

/// Extract a deadline date string from flattened text.
///
/// Returns the first capturing-group match, trying patterns in priority order.
pub fn extract_deadline(text: &str) -> Option<String> {
    for pattern in DEADLINE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().to_string());
            }
        }
    }
    None
}

/// Reduce a "Name, Affiliation, titles..." line to just the name.
///
/// Returns an empty string when the input is actually a label (a stop
/// indicator within the first 3 characters) or when nothing survives.
pub fn extract_pure_name(text: &str) -> String {
    let mut text = normalize_whitespace(&text.replace('\u{a0}', " "));

    if let Some(m) = STOP_INDICATOR_AC.find(&text) {
        if m.start() < 3 {
            return String::new();
        }
        text.truncate(m.start());
    }

    if let Some(idx) = text.find(',') {
        text.truncate(idx);
    }

    let text = HONORIFIC_RE.replace_all(&text, "");
    let text = TRAILING_ROLE_RE.replace_all(&text, "");
    let text = EMAIL_RE.replace_all(&text, "");

    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || ",.-:()".contains(c));
    normalize_whitespace(trimmed)
}

/// True for short label/date fragments that must not enter the description.
pub fn is_metadata_line(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lower.contains("submission deadline") && text.len() < 100 {
        return true;
    }
    text.len() < 30 && DATE_TOKEN_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deadline_labeled_prefix() {
        let text = "Important dates. Submission deadline: 14 March 2026. Acceptance later.";
        assert_eq!(extract_deadline(text), Some("14 March 2026".to_string()));
    }

    #[test]
    fn deadline_label_wins_over_earlier_bare_date() {
        let text = "Opens 1 January 2026. Deadline: 30 June 2026.";
        assert_eq!(extract_deadline(text), Some("30 June 2026".to_string()));
    }

    #[test]
    fn deadline_due_and_submission_labels() {
        assert_eq!(
            extract_deadline("Papers due 5 May 2027"),
            Some("5 May 2027".to_string())
        );
        assert_eq!(
            extract_deadline("Submission: 9 October 2026"),
            Some("9 October 2026".to_string())
        );
    }

    #[test]
    fn deadline_bare_date_fallback() {
        assert_eq!(
            extract_deadline("All papers by 1 Sept 2026 at the latest"),
            Some("1 Sept 2026".to_string())
        );
    }

    #[test]
    fn deadline_none_without_date_token() {
        assert_eq!(extract_deadline("Deadline: to be announced"), None);
        assert_eq!(extract_deadline(""), None);
    }

    #[test]
    fn pure_name_drops_affiliation() {
        assert_eq!(
            extract_pure_name("Jane Doe, University of X"),
            "Jane Doe".to_string()
        );
    }

    #[test]
    fn pure_name_strips_honorifics_and_roles() {
        assert_eq!(extract_pure_name("Dr. Jane Doe"), "Jane Doe");
        assert_eq!(extract_pure_name("Prof John Smith, Dept"), "John Smith");
        assert_eq!(extract_pure_name("Associate Professor Wei Chen"), "Wei Chen");
    }

    #[test]
    fn pure_name_rejects_leading_indicator() {
        assert_eq!(extract_pure_name("Department of Urban Studies"), "");
        assert_eq!(extract_pure_name("Email: someone@example.com"), "");
    }

    #[test]
    fn pure_name_strips_embedded_email() {
        assert_eq!(
            extract_pure_name("Jane Doe jane.doe@example.edu"),
            "Jane Doe"
        );
    }

    #[test]
    fn pure_name_handles_nbsp_and_punctuation() {
        assert_eq!(extract_pure_name("Jane\u{a0}Doe ,"), "Jane Doe");
    }

    #[test]
    fn pure_name_drops_parenthesized_role() {
        assert_eq!(
            extract_pure_name("Dr. Grace Hopper (Lead Guest Editor), Yale University"),
            "Grace Hopper"
        );
    }

    #[test]
    fn metadata_line_short_deadline_label() {
        assert!(is_metadata_line("Submission deadline: 14 March 2026"));
        assert!(is_metadata_line("1 April 2026"));
    }

    #[test]
    fn metadata_line_negative_cases() {
        assert!(!is_metadata_line(
            "This special issue invites contributions on remote sensing of urban climates."
        ));
        // Long deadline sentences are real content.
        let long = format!(
            "The submission deadline has been extended; {} see the journal homepage for the revised timetable and notes.",
            "as a courtesy to contributors"
        );
        assert!(!is_metadata_line(&long));
    }
}
