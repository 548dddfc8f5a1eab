//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Base URL, used for canonical and og:url links
    pub url: String,

    // Content
    pub content_dir: String,
    /// File extension (without the dot) of content documents
    pub content_extension: String,
    /// Content file rendered at `/`
    pub index_file: String,

    // Assets and templates
    pub static_dir: String,
    /// Directory with templates that override the embedded ones
    pub template_dir: Option<String>,

    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Docs".to_string(),
            url: "http://localhost:8080".to_string(),

            content_dir: "markdown".to_string(),
            content_extension: "md".to_string(),
            index_file: "index.md".to_string(),

            static_dir: "static".to_string(),
            template_dir: None,

            server: ServerConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Build an absolute URL for a path fragment such as a page's `MetaOgURL`
    pub fn full_url(&self, fragment: &str) -> String {
        let base = self.url.trim_end_matches('/');
        if fragment.starts_with("http://") || fragment.starts_with("https://") {
            fragment.to_string()
        } else if fragment.is_empty() {
            format!("{}/", base)
        } else {
            format!("{}/{}", base, fragment.trim_start_matches('/'))
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "markdown");
        assert_eq!(config.content_extension, "md");
        assert_eq!(config.server.port, 8080);
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Handbook
content_dir: pages
server:
  port: 3000
highlight:
  enable: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Handbook");
        assert_eq!(config.content_dir, "pages");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.ip, "0.0.0.0");
        assert!(!config.highlight.enable);
        assert_eq!(config.index_file, "index.md");
    }

    #[test]
    fn test_full_url() {
        let config = SiteConfig {
            url: "https://docs.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.full_url("guides/setup"),
            "https://docs.example.com/guides/setup"
        );
        assert_eq!(config.full_url("/setup"), "https://docs.example.com/setup");
        assert_eq!(config.full_url(""), "https://docs.example.com/");
        assert_eq!(
            config.full_url("https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }
}
