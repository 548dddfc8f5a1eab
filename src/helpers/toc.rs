//! In-page heading links

use super::html::html_escape;

/// Derive the anchor ID for a heading.
///
/// Lowercases the text, turns each space into `-` and drops everything that
/// is not `a-z`, `0-9` or `-`. The markdown renderer assigns heading IDs with
/// this same function, so links built here always land on their heading.
///
/// # Examples
/// ```
/// use docsite::helpers::anchor_id;
///
/// assert_eq!(anchor_id("API Design!"), "api-design");
/// assert_eq!(anchor_id("Step 2: Run it"), "step-2-run-it");
/// ```
pub fn anchor_id(heading: &str) -> String {
    heading
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// Build the list items linking to each heading of a page, in order
pub fn sidebar_links(headings: &[String]) -> String {
    headings
        .iter()
        .map(|heading| {
            format!(
                r##"<li><a href="#{}">{}</a></li>"##,
                anchor_id(heading),
                html_escape(heading)
            )
        })
        .collect()
}
