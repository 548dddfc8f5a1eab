//! List site content

use anyhow::Result;

use crate::{Site, SiteContent};

/// List site content by type
pub fn run(site: &Site, content_type: &str, json: bool) -> Result<()> {
    let content = site.load()?;
    print!("{}", render(&content, content_type, json)?);
    Ok(())
}

/// Format the listing for a content type
pub fn render(content: &SiteContent, content_type: &str, json: bool) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "page" | "pages" => {
            if json {
                let pages: Vec<_> = content.pages.iter().map(|p| &p.meta).collect();
                out.push_str(&serde_json::to_string_pretty(&pages)?);
                out.push('\n');
            } else {
                out.push_str(&format!("Pages ({}):\n", content.pages.len()));
                for page in &content.pages {
                    let path = page.path().unwrap_or_else(|| "(no slug)".to_string());
                    out.push_str(&format!("  {} - {} [{}]\n", path, page.title(), page.source));
                }
            }
        }
        "category" | "categories" => {
            let nav = &content.navigation;
            if json {
                let categories: Vec<_> = nav
                    .categories
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "name": c.name,
                            "rank": c.rank,
                            "pages": c.pages.iter().map(|p| p.title()).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                out.push_str(&serde_json::to_string_pretty(&categories)?);
                out.push('\n');
            } else {
                out.push_str(&format!("Categories ({}):\n", nav.len()));
                for category in &nav.categories {
                    out.push_str(&format!("  {} (rank {})\n", category.name, category.rank));
                    for page in &category.pages {
                        out.push_str(&format!("    - {}\n", page.title()));
                    }
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: page, category",
                content_type
            );
        }
    }

    Ok(out)
}
