//! Content module - parses content files into pages and builds the sidebar

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod nav;
mod page;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, DELIMITER};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use nav::{Category, NavigationTree};
pub use page::{extract_headings, ContentPage, PageMeta, DEFAULT_RANK};
