//! Validate the content directory without serving it

use anyhow::Result;
use std::collections::HashMap;

use crate::{Site, SiteContent};

/// Summary of a loaded content directory
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub pages: usize,
    pub categories: usize,
    /// Titles of pages that have no slug
    pub unrouted: Vec<String>,
    /// Slugs used by more than one page
    pub duplicate_slugs: Vec<String>,
    pub has_index: bool,
}

impl Report {
    pub fn new(content: &SiteContent, index_file: &str) -> Self {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for page in content.pages.iter().filter(|p| !p.slug().is_empty()) {
            *seen.entry(page.slug()).or_insert(0) += 1;
        }
        let mut duplicate_slugs: Vec<String> = seen
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(slug, _)| slug.to_string())
            .collect();
        duplicate_slugs.sort();

        Self {
            pages: content.pages.len(),
            categories: content.navigation.len(),
            unrouted: content
                .pages
                .iter()
                .filter(|p| p.slug().is_empty() && p.source != index_file)
                .map(|p| p.title().to_string())
                .collect(),
            duplicate_slugs,
            has_index: content.by_source(index_file).is_some(),
        }
    }
}

/// Load the content and print a report; fails if any page fails to load
pub fn run(site: &Site) -> Result<Report> {
    let content = site.load()?;
    let report = Report::new(&content, &site.config.index_file);

    println!(
        "{} pages, {} categories in {:?}",
        report.pages, report.categories, site.content_dir
    );
    if !report.has_index {
        println!("  missing index page: {}", site.config.index_file);
    }
    for title in &report.unrouted {
        println!("  no slug (not routable): {}", title);
    }
    for slug in &report.duplicate_slugs {
        println!("  duplicate slug, first page wins: /{}", slug);
    }

    Ok(report)
}
