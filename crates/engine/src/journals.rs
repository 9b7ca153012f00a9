// ABOUTME: Journal registry: the built-in target list plus loading from JSON.
// ABOUTME: Built-ins are compiled in from data/journals.json.

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// One journal to scrape: display name plus landing-page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub name: String,
    pub url: String,
}

const BUILTIN_JOURNALS_JSON: &str = include_str!("../data/journals.json");

/// The compiled-in journal list.
pub fn load_builtin_journals() -> Vec<Journal> {
    // The embedded file is validated by tests; a parse failure here is a
    // build defect, not a runtime condition.
    serde_json::from_str(BUILTIN_JOURNALS_JSON).unwrap_or_default()
}

/// Parse a journal list from a JSON document (same shape as the built-in
/// file: an array of `{name, url}` objects).
pub fn parse_journals(json: &str) -> Result<Vec<Journal>, ScrapeError> {
    serde_json::from_str(json).map_err(|e| {
        ScrapeError::extract(
            "",
            "LoadJournals",
            Some(anyhow::anyhow!("invalid journals JSON: {}", e)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_list_parses_and_is_nonempty() {
        let journals = load_builtin_journals();
        assert!(!journals.is_empty());
        for journal in &journals {
            assert!(!journal.name.is_empty());
            assert!(journal.url.starts_with("https://"));
        }
    }

    #[test]
    fn builtin_list_covers_known_families() {
        let journals = load_builtin_journals();
        let names: Vec<&str> = journals.iter().map(|j| j.name.as_str()).collect();
        assert!(names.iter().any(|n| n.contains("Cities")));
        assert!(names.iter().any(|n| n.contains("Remote Sensing")));
    }

    #[test]
    fn parse_journals_accepts_custom_list() {
        let json = r#"[{"name": "Test Journal", "url": "https://example.com/tj"}]"#;
        let journals = parse_journals(json).unwrap();
        assert_eq!(journals.len(), 1);
        assert_eq!(journals[0].name, "Test Journal");
    }

    #[test]
    fn parse_journals_rejects_malformed_json() {
        let err = parse_journals("{not json").unwrap_err();
        assert!(err.is_extract());
    }
}
