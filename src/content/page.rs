//! Content page model

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::error::ContentError;
use super::{FrontMatter, MarkdownRenderer};

/// Rank given to pages without a usable `Order`, sorting them last
pub const DEFAULT_RANK: i64 = 9999;

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^##\s+(.*)").unwrap();
    static ref HEADING_START_RE: Regex = Regex::new(r"^##\s+(.*)").unwrap();
}

/// Typed front matter of a content page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub slug: String,
    /// Navigation category (`Parent`)
    pub category: String,
    /// Short description shown under the title (`Description`)
    pub summary: String,
    /// Ordering key (`Order`)
    pub rank: i64,
    pub meta_description: String,
    pub meta_property_title: String,
    pub meta_property_description: String,
    pub meta_og_url: String,
}

impl PageMeta {
    /// Type the raw fields. Missing text fields become empty strings and a
    /// missing or non-numeric `Order` becomes [`DEFAULT_RANK`].
    pub fn from_front_matter(fm: &FrontMatter) -> Self {
        let rank = parse_rank(fm.get("Order")).unwrap_or_else(|e| {
            tracing::debug!("{}, using {}", e, DEFAULT_RANK);
            DEFAULT_RANK
        });

        Self {
            title: fm.text("Title"),
            slug: fm.text("Slug"),
            category: fm.text("Parent"),
            summary: fm.text("Description"),
            rank,
            meta_description: fm.text("MetaDescription"),
            meta_property_title: fm.text("MetaPropertyTitle"),
            meta_property_description: fm.text("MetaPropertyDescription"),
            meta_og_url: fm.text("MetaOgURL"),
        }
    }
}

/// A missing `Order` is the normal default; only a present, non-numeric one is an error
fn parse_rank(value: Option<&str>) -> Result<i64, ContentError> {
    let Some(value) = value else {
        return Ok(DEFAULT_RANK);
    };
    value
        .parse::<i64>()
        .map_err(|_| ContentError::InvalidFieldValue {
            field: "Order",
            value: value.to_string(),
        })
}

/// One loaded content document
#[derive(Debug, Clone, Serialize)]
pub struct ContentPage {
    /// Typed front matter
    #[serde(flatten)]
    pub meta: PageMeta,

    /// Rendered HTML body; trusted, must not be escaped again
    pub content: String,

    /// Level-2 heading texts in document order
    pub headings: Vec<String>,

    /// Source file name, relative to the content directory
    pub source: String,
}

impl ContentPage {
    /// Build a page from a whole document
    pub fn parse(
        raw: &str,
        source: impl Into<String>,
        renderer: &MarkdownRenderer,
    ) -> Result<Self, ContentError> {
        let (fm, body) = FrontMatter::parse(raw)?;
        Ok(Self::build(&fm, &body, source, renderer))
    }

    /// Build a page from parsed front matter and the markdown body
    pub fn build(
        fm: &FrontMatter,
        body: &str,
        source: impl Into<String>,
        renderer: &MarkdownRenderer,
    ) -> Self {
        Self {
            meta: PageMeta::from_front_matter(fm),
            content: renderer.render(body),
            headings: extract_headings(body),
            source: source.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn category(&self) -> &str {
        &self.meta.category
    }

    pub fn rank(&self) -> i64 {
        self.meta.rank
    }

    /// URL path of the page, if it is routable
    pub fn path(&self) -> Option<String> {
        if self.meta.slug.is_empty() {
            None
        } else {
            Some(format!("/{}", self.meta.slug))
        }
    }
}

/// Collect the text of every `## ` heading line, marker stripped
pub fn extract_headings(body: &str) -> Vec<String> {
    HEADING_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Heading text [`extract_headings`] captures for a heading whose line starts
/// at the beginning of `source`
pub(crate) fn heading_text_at(source: &str) -> Option<&str> {
    HEADING_START_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
