//! Front-matter parsing
//!
//! Content files start with a block of `Key: value` lines, followed by `---`
//! and the markdown body:
//!
//! ```text
//! Title: Getting Started
//! Slug: getting-started
//! Parent: Guides
//! Order: 1
//! ---
//! ## Install
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use super::error::ContentError;

/// Separator between the metadata block and the body
pub const DELIMITER: &str = "---";

lazy_static! {
    static ref FIELD_RE: Regex = Regex::new(r"(?m)^([A-Za-z0-9_]+):[ \t]*(.*)$").unwrap();
}

/// Raw front-matter fields of one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
}

impl FrontMatter {
    /// Split raw content into the metadata block and the body block.
    ///
    /// The split happens at the first occurrence of `---`. Carriage returns
    /// are removed from both halves.
    pub fn split(content: &str) -> Result<(String, String), ContentError> {
        let (meta, body) = content
            .split_once(DELIMITER)
            .ok_or(ContentError::MalformedDocument { path: None })?;

        Ok((meta.replace('\r', ""), body.replace('\r', "")))
    }

    /// Parse a whole document. Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, String), ContentError> {
        let (meta, body) = Self::split(content)?;
        Ok((Self::from_block(&meta), body))
    }

    /// Extract `Key: value` lines from a metadata block; later keys overwrite earlier ones
    pub fn from_block(block: &str) -> Self {
        let fields = FIELD_RE
            .captures_iter(block)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect();
        Self { fields }
    }

    /// Value of a field, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of a field, or an empty string
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = "Title: Hello World\nSlug: hello\nParent: Guides\nOrder: 3\n---\n## Intro\n\nBody.\n";

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("Title"), Some("Hello World"));
        assert_eq!(fm.get("Slug"), Some("hello"));
        assert_eq!(fm.get("Parent"), Some("Guides"));
        assert_eq!(fm.get("Order"), Some("3"));
        assert_eq!(fm.len(), 4);
        assert!(body.contains("## Intro"));
    }

    #[test]
    fn test_missing_delimiter() {
        let err = FrontMatter::parse("Title: X\nNo delimiter here").unwrap_err();
        assert!(matches!(
            err,
            ContentError::MalformedDocument { path: None }
        ));
    }

    #[test]
    fn test_split_roundtrip() {
        let content = "Title: A\r\nSlug: a\r\n---\r\nText with --- inside\r\n";
        let (meta, body) = FrontMatter::split(content).unwrap();
        assert_eq!(meta, "Title: A\nSlug: a\n");
        assert_eq!(body, "\nText with --- inside\n");
        assert_eq!(
            format!("{}{}{}", meta, DELIMITER, body),
            content.replace('\r', "")
        );
    }

    #[test]
    fn test_split_at_first_delimiter_only() {
        let (meta, body) = FrontMatter::split("Title: A --- B\n---\nbody").unwrap();
        assert_eq!(meta, "Title: A ");
        assert_eq!(body, " B\n---\nbody");
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let fm = FrontMatter::from_block("Title: First\nTitle: Second\n");
        assert_eq!(fm.get("Title"), Some("Second"));
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn test_ignores_non_matching_lines() {
        let fm = FrontMatter::from_block(
            "just some prose\n  Indented: nope\nMeta-Key: nope\nDescription:   padded value   \n",
        );
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get("Description"), Some("padded value"));
        assert_eq!(fm.get("Indented"), None);
    }

    #[test]
    fn test_empty_value_and_missing_key() {
        let fm = FrontMatter::from_block("Slug:\nTitle: T\n");
        assert_eq!(fm.get("Slug"), Some(""));
        assert_eq!(fm.get("Title"), Some("T"));
        assert_eq!(fm.text("Parent"), "");
    }

    #[test]
    fn test_value_keeps_colons() {
        let fm = FrontMatter::from_block("MetaOgURL: https://example.com/a\n");
        assert_eq!(fm.get("MetaOgURL"), Some("https://example.com/a"));
    }
}
