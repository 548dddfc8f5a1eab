//! Content loader - loads every page from the content directory

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use super::error::ContentError;
use super::{ContentPage, MarkdownRenderer};
use crate::config::SiteConfig;

/// Loads content pages from a directory
pub struct ContentLoader {
    renderer: MarkdownRenderer,
    extension: String,
}

impl ContentLoader {
    /// Create a loader using the site's highlight and extension settings
    pub fn new(config: &SiteConfig) -> Self {
        Self::with_renderer(
            MarkdownRenderer::with_options(&config.highlight),
            &config.content_extension,
        )
    }

    pub fn with_renderer(renderer: MarkdownRenderer, extension: &str) -> Self {
        Self {
            renderer,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Load every content file directly inside `dir`, in file-name order.
    ///
    /// Subdirectories and files with other extensions are skipped, whether or
    /// not they can be read. The first unreadable or malformed content file
    /// aborts the whole load.
    pub fn load_all(&self, dir: &Path) -> Result<Vec<ContentPage>, ContentError> {
        let mut pages = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                    return Err(ContentError::DirectoryUnreadable {
                        path: dir.to_path_buf(),
                        source,
                    });
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    if !self.is_content_file(&path) {
                        tracing::debug!("Skipping unreadable entry {:?}: {}", path, e);
                        continue;
                    }
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                    return Err(ContentError::FileUnreadable { path, source });
                }
            };

            let path = entry.path();
            if !self.is_content_file(path) || !self.is_file_entry(&entry)? {
                tracing::trace!("Skipping {:?}", path);
                continue;
            }

            let page = self.load_page(dir, path)?;
            if page.slug().is_empty() {
                tracing::warn!(
                    "Page '{}' ({}) has an empty slug and will not be accessible via a unique URL",
                    page.title(),
                    page.source
                );
            }
            pages.push(page);
        }

        tracing::debug!("Loaded {} pages from {:?}", pages.len(), dir);
        Ok(pages)
    }

    /// Whether a content-named entry is a regular file, resolving symlinks.
    /// A symlink whose target cannot be read is an error.
    fn is_file_entry(&self, entry: &walkdir::DirEntry) -> Result<bool, ContentError> {
        if !entry.path_is_symlink() {
            return Ok(entry.file_type().is_file());
        }
        fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .map_err(|source| ContentError::FileUnreadable {
                path: entry.path().to_path_buf(),
                source,
            })
    }

    /// Load a single page from a file
    fn load_page(&self, dir: &Path, path: &Path) -> Result<ContentPage, ContentError> {
        let raw = fs::read(path).map_err(|source| ContentError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = String::from_utf8_lossy(&raw);

        let source = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        ContentPage::parse(&raw, source, &self.renderer).map_err(|e| e.at(path))
    }

    /// Check if a file has the content extension
    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader() -> ContentLoader {
        let config = SiteConfig {
            highlight: crate::config::HighlightConfig {
                enable: false,
                ..Default::default()
            },
            ..Default::default()
        };
        ContentLoader::new(&config)
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_load_all_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.md", "Title: B\nSlug: b\n---\n## Two\n");
        write(&dir, "a.md", "Title: A\nSlug: a\n---\n## One\n");
        write(&dir, "notes.txt", "Title: ignored\n---\n");
        fs::create_dir(dir.path().join("nested.md")).unwrap();
        write(&dir, "c.markdown", "Title: C\n---\n");

        let pages = loader().load_all(dir.path()).unwrap();
        let titles: Vec<_> = pages.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(pages[0].source, "a.md");
        assert_eq!(pages[0].headings, vec!["One"]);
    }

    #[test]
    fn test_subdirectories_not_descended() {
        let dir = TempDir::new().unwrap();
        write(&dir, "top.md", "Title: Top\n---\n");
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("deep.md"), "Title: Deep\n---\n").unwrap();

        let pages = loader().load_all(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title(), "Top");
    }

    #[test]
    fn test_malformed_file_aborts_load() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "Title: Good\n---\nbody\n");
        write(&dir, "b.md", "Title: X\nNo delimiter here");
        write(&dir, "c.md", "Title: Also good\n---\n");

        let err = loader().load_all(dir.path()).unwrap_err();
        match err {
            ContentError::MalformedDocument { path: Some(path) } => {
                assert!(path.ends_with("b.md"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = loader().load_all(&missing).unwrap_err();
        assert!(matches!(err, ContentError::DirectoryUnreadable { .. }));
    }

    #[test]
    fn test_empty_slug_still_loaded() {
        let dir = TempDir::new().unwrap();
        write(&dir, "draft.md", "Title: Draft\nParent: Guides\n---\n");

        let pages = loader().load_all(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug(), "");
        assert_eq!(pages[0].path(), None);
    }

    #[test]
    fn test_crlf_content() {
        let dir = TempDir::new().unwrap();
        write(&dir, "win.md", "Title: Windows\r\nOrder: 4\r\n---\r\n## Heading\r\n");

        let pages = loader().load_all(dir.path()).unwrap();
        assert_eq!(pages[0].title(), "Windows");
        assert_eq!(pages[0].rank(), 4);
        assert_eq!(pages[0].headings, vec!["Heading"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_to_other_file_ignored() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        write(&dir, "page.md", "Title: Page\nSlug: page\n---\n");
        symlink(dir.path().join("gone.txt"), dir.path().join("notes.txt")).unwrap();

        let pages = loader().load_all(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title(), "Page");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_pages() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        fs::write(elsewhere.path().join("shared.md"), "Title: Shared\n---\n").unwrap();
        fs::create_dir(elsewhere.path().join("folder.md")).unwrap();
        symlink(elsewhere.path().join("shared.md"), dir.path().join("linked.md")).unwrap();
        symlink(elsewhere.path().join("folder.md"), dir.path().join("dir.md")).unwrap();

        let pages = loader().load_all(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title(), "Shared");
        assert_eq!(pages[0].source, "linked.md");

        symlink(dir.path().join("gone.md"), dir.path().join("missing.md")).unwrap();
        let err = loader().load_all(dir.path()).unwrap_err();
        match err {
            ContentError::FileUnreadable { path, .. } => assert!(path.ends_with("missing.md")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "Title: Md\n---\n");
        write(&dir, "b.txt", "Title: Txt\n---\n");

        let loader = ContentLoader::with_renderer(MarkdownRenderer::new(), ".txt");
        let pages = loader.load_all(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title(), "Txt");
    }
}
