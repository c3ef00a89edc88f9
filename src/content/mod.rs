//! Content module - turns markdown sources into post records

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::{validate_posts, ContentLoader};
pub use markdown::MarkdownRenderer;
pub use post::Post;
