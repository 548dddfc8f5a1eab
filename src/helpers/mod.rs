//! Helper functions shared by the markdown renderer and the templates

mod html;
mod toc;

pub use html::*;
pub use toc::*;
