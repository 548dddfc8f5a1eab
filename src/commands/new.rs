//! Create a new content page

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::anchor_id;
use crate::Site;

/// Options for a new page
#[derive(Debug, Default)]
pub struct NewPage<'a> {
    pub title: &'a str,
    pub slug: Option<&'a str>,
    pub parent: Option<&'a str>,
    pub order: Option<i64>,
}

/// Write a new page scaffold into the content directory
pub fn create_page(site: &Site, page: &NewPage) -> Result<PathBuf> {
    let slug = match page.slug {
        Some(slug) => slug.to_string(),
        None => anchor_id(page.title).trim_matches('-').to_string(),
    };
    if slug.is_empty() {
        anyhow::bail!(
            "Cannot derive a slug from title {:?}, pass one with --slug",
            page.title
        );
    }

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site
        .content_dir
        .join(format!("{}.{}", slug, site.config.content_extension));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(page, &slug))?;
    tracing::info!("Created page {:?}", file_path);

    Ok(file_path)
}

fn scaffold(page: &NewPage, slug: &str) -> String {
    let mut content = format!("Title: {}\nSlug: {}\n", page.title, slug);
    if let Some(parent) = page.parent {
        content.push_str(&format!("Parent: {}\n", parent));
    }
    if let Some(order) = page.order {
        content.push_str(&format!("Order: {}\n", order));
    }
    content.push_str(&format!(
        "Description:\nMetaDescription:\nMetaPropertyTitle: {}\nMetaPropertyDescription:\nMetaOgURL: {}\n---\n## Overview\n",
        page.title, slug
    ));
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPage, MarkdownRenderer};
    use tempfile::TempDir;

    #[test]
    fn test_create_page() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_page(&site, &NewPage {
            title: "Getting Started!",
            parent: Some("Guides"),
            order: Some(3),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(path, dir.path().join("markdown").join("getting-started.md"));

        let raw = fs::read_to_string(&path).unwrap();
        let page = ContentPage::parse(&raw, "getting-started.md", &MarkdownRenderer::new()).unwrap();
        assert_eq!(page.title(), "Getting Started!");
        assert_eq!(page.slug(), "getting-started");
        assert_eq!(page.category(), "Guides");
        assert_eq!(page.rank(), 3);
        assert_eq!(page.headings, vec!["Overview"]);
    }

    #[test]
    fn test_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let page = NewPage {
            title: "Intro",
            ..Default::default()
        };

        create_page(&site, &page).unwrap();
        assert!(create_page(&site, &page).is_err());
    }

    #[test]
    fn test_explicit_slug_and_empty_title_slug() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_page(&site, &NewPage {
            title: "???",
            slug: Some("faq"),
            ..Default::default()
        })
        .unwrap();
        assert!(path.ends_with("faq.md"));

        assert!(create_page(&site, &NewPage {
            title: "???",
            ..Default::default()
        })
        .is_err());
    }
}
