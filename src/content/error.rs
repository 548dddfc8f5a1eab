//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning the content directory into pages
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document has no `---` separating front matter from the body
    #[error("malformed document{}: missing `---` front-matter delimiter", display_path(.path))]
    MalformedDocument { path: Option<PathBuf> },

    #[error("cannot read content directory `{}`", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read content file `{}`", .path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A front-matter value that could not be typed; always recovered with a default
    #[error("invalid value `{value}` for field `{field}`")]
    InvalidFieldValue { field: &'static str, value: String },
}

impl ContentError {
    /// Attach the offending file to a malformed-document error
    pub fn at(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ContentError::MalformedDocument { path: None } => ContentError::MalformedDocument {
                path: Some(file.into()),
            },
            other => other,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" `{}`", p.display()))
        .unwrap_or_default()
}
