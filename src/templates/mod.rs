//! Page templates using the Tera template engine
//!
//! The default templates are embedded in the binary. A site may point
//! `template_dir` at a directory whose templates replace embedded ones with
//! the same name.

use anyhow::{bail, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{ContentPage, NavigationTree};
use crate::helpers::{anchor_id, html_escape, sidebar_links};

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the embedded templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Self::embedded()?;
        Self::configure(&mut tera);
        Ok(Self { tera })
    }

    /// Create a renderer where templates from `dir` take precedence
    pub fn with_overrides(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("Template directory {:?} does not exist", dir);
        }

        let glob = format!("{}/**/*.html", dir.display());
        let mut tera = Tera::parse(&glob)?;
        for name in tera.get_template_names() {
            tracing::debug!("Template override: {}", name);
        }
        tera.extend(&Self::embedded()?)?;
        tera.build_inheritance_chains()?;

        Self::configure(&mut tera);
        Ok(Self { tera })
    }

    fn embedded() -> Result<Tera> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("default/base.html")),
            ("layout.html", include_str!("default/layout.html")),
            ("index.html", include_str!("default/index.html")),
            ("404.html", include_str!("default/404.html")),
            // Partials
            (
                "partials/head.html",
                include_str!("default/partials/head.html"),
            ),
            (
                "partials/sidebar.html",
                include_str!("default/partials/sidebar.html"),
            ),
        ])?;
        Ok(tera)
    }

    fn configure(tera: &mut Tera) {
        // `.html` templates keep tera's autoescape; URLs use `escape_html | safe`
        // so their slashes stay readable
        tera.register_filter("escape_html", escape_html_filter);
        tera.register_filter("anchor", anchor_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
    }

    /// Render a template with a serializable context
    pub fn render<T: Serialize>(&self, template_name: &str, data: &T) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(template_name, &context)?)
    }

    /// Whether a template with this name is loaded
    pub fn has_template(&self, template_name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == template_name)
    }
}

/// Tera filter: HTML-escape text without touching slashes
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: heading text to its anchor ID
fn anchor_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("anchor", "value", String, value);
    Ok(tera::Value::String(anchor_id(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            url: config.url.trim_end_matches('/').to_string(),
        }
    }
}

/// Values for the `<head>` section
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadData {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub og_url: String,
}

impl HeadData {
    /// SEO fields of a page, falling back to its title and summary
    pub fn for_page(page: &ContentPage, config: &SiteConfig) -> Self {
        let meta = &page.meta;
        let description = first_non_empty(&meta.meta_description, &meta.summary);
        let og_fragment = first_non_empty(&meta.meta_og_url, &meta.slug);

        Self {
            title: meta.title.clone(),
            og_title: first_non_empty(&meta.meta_property_title, &meta.title),
            og_description: first_non_empty(&meta.meta_property_description, &description),
            og_url: config.full_url(&og_fragment),
            description,
        }
    }

    pub fn titled(title: &str, config: &SiteConfig) -> Self {
        Self {
            title: title.to_string(),
            og_title: title.to_string(),
            og_url: config.full_url(""),
            ..Default::default()
        }
    }
}

fn first_non_empty(primary: &str, fallback: &str) -> String {
    if primary.is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

/// Sidebar view of the navigation tree (no page bodies)
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigationData {
    pub categories: Vec<NavCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavCategory {
    pub name: String,
    pub rank: i64,
    pub pages: Vec<NavPage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPage {
    pub title: String,
    pub slug: String,
    pub summary: String,
}

impl From<&NavigationTree> for NavigationData {
    fn from(tree: &NavigationTree) -> Self {
        let categories = tree
            .categories
            .iter()
            .map(|c| NavCategory {
                name: c.name.clone(),
                rank: c.rank,
                pages: c
                    .pages
                    .iter()
                    .map(|p| NavPage {
                        title: p.meta.title.clone(),
                        slug: p.meta.slug.clone(),
                        summary: p.meta.summary.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }
}

/// Context for `layout.html` and `index.html`
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub site: &'a SiteData,
    pub head: HeadData,
    pub navigation: &'a NavigationData,
    pub page: &'a ContentPage,
    /// `<li>` links to the page's headings
    pub sidebar_links: String,
    pub current_slug: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(
        site: &'a SiteData,
        navigation: &'a NavigationData,
        page: &'a ContentPage,
        config: &SiteConfig,
    ) -> Self {
        Self {
            site,
            head: HeadData::for_page(page, config),
            navigation,
            page,
            sidebar_links: sidebar_links(&page.headings),
            current_slug: page.slug(),
        }
    }
}

/// Context for `404.html`
#[derive(Debug, Serialize)]
pub struct NotFoundContext<'a> {
    pub site: &'a SiteData,
    pub head: HeadData,
    pub navigation: &'a NavigationData,
    pub current_slug: &'a str,
}
