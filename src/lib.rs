//! docsite: a small documentation server
//!
//! Reads a directory of markdown pages with `Key: value` front matter,
//! renders them once at startup and serves them with a shared sidebar
//! grouped by each page's `Parent` category.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, ContentPage, NavigationTree};

/// The main application handle
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (markdown) directory
    pub content_dir: PathBuf,
    /// Static asset directory
    pub static_dir: PathBuf,
    /// Template override directory
    pub template_dir: Option<PathBuf>,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let template_dir = config.template_dir.as_ref().map(|dir| base_dir.join(dir));

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            template_dir,
        }
    }

    /// Load every page and build the navigation tree
    pub fn load(&self) -> Result<SiteContent> {
        let loader = ContentLoader::new(&self.config);
        let pages = loader.load_all(&self.content_dir)?;
        let navigation = NavigationTree::build(&pages);

        tracing::info!(
            "Loaded {} pages in {} categories",
            pages.len(),
            navigation.len()
        );

        Ok(SiteContent { pages, navigation })
    }
}

/// Everything loaded from the content directory. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    /// Pages in discovery order
    pub pages: Vec<ContentPage>,
    pub navigation: NavigationTree,
}

impl SiteContent {
    /// Find a page by its source file name
    pub fn by_source(&self, source: &str) -> Option<&ContentPage> {
        self.pages.iter().find(|p| p.source == source)
    }

    /// Find the first page with the given slug
    pub fn by_slug(&self, slug: &str) -> Option<&ContentPage> {
        if slug.is_empty() {
            return None;
        }
        self.pages.iter().find(|p| p.slug() == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("markdown"));
        assert_eq!(site.static_dir, dir.path().join("static"));
        assert!(site.template_dir.is_none());
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("_config.yml"),
            "content_dir: docs\ntemplate_dir: theme\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("docs"));
        assert_eq!(site.template_dir, Some(dir.path().join("theme")));
    }

    #[test]
    fn test_load_builds_navigation() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("markdown");
        fs::create_dir(&content).unwrap();
        fs::write(content.join("index.md"), "Title: Home\n---\nWelcome\n").unwrap();
        fs::write(
            content.join("setup.md"),
            "Title: Setup\nSlug: setup\nParent: Guides\nOrder: 1\n---\n## Install\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        let loaded = site.load().unwrap();

        assert_eq!(loaded.pages.len(), 2);
        assert_eq!(loaded.navigation.len(), 1);
        assert_eq!(loaded.by_source("index.md").unwrap().title(), "Home");
        assert_eq!(loaded.by_slug("setup").unwrap().title(), "Setup");
        assert!(loaded.by_slug("").is_none());
    }

    #[test]
    fn test_load_fails_on_malformed_page() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("markdown");
        fs::create_dir(&content).unwrap();
        fs::write(content.join("bad.md"), "Title: X\nNo delimiter here").unwrap();

        let site = Site::new(dir.path()).unwrap();
        let err = site.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<content::ContentError>(),
            Some(content::ContentError::MalformedDocument { .. })
        ));
    }
}
