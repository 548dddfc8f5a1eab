//! Sidebar navigation built from page categories

use indexmap::IndexMap;
use serde::Serialize;

use super::ContentPage;

/// A named group of pages in the sidebar
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    /// Rank of the first page seen in this category
    pub rank: i64,
    /// Member pages in discovery order
    pub pages: Vec<ContentPage>,
}

/// All categories, ordered by rank
#[derive(Debug, Clone, Default, Serialize)]
pub struct NavigationTree {
    pub categories: Vec<Category>,
}

impl NavigationTree {
    /// Group pages by category and order the groups by rank.
    ///
    /// Pages with an empty category are left out. A category keeps the rank
    /// of the first page that introduced it, even if later members disagree.
    /// Categories with equal rank stay in the order they were discovered.
    pub fn build(pages: &[ContentPage]) -> Self {
        let mut groups: IndexMap<&str, Category> = IndexMap::new();

        for page in pages.iter().filter(|p| !p.category().is_empty()) {
            groups
                .entry(page.category())
                .or_insert_with(|| Category {
                    name: page.category().to_string(),
                    rank: page.rank(),
                    pages: Vec::new(),
                })
                .pages
                .push(page.clone());
        }

        let mut categories: Vec<Category> = groups.into_values().collect();
        // sort_by_key is stable
        categories.sort_by_key(|c| c.rank);

        Self { categories }
    }

    /// Look up a category by name
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
