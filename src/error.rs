//! Errors raised when the post collection breaks its data contract

use thiserror::Error;

/// A post record that violates the invariants the home page relies on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The `date` field could not be parsed into a comparable date
    #[error("post {id:?} has an unparseable date {value:?}")]
    InvalidDate { id: String, value: String },

    /// Two posts share the same `id`
    #[error("duplicate post id {id:?}")]
    DuplicateId { id: String },

    /// Two posts would be published under the same `slug`
    #[error("posts {first:?} and {second:?} share the slug {slug:?}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    /// The slug is empty, so the post has no link target
    #[error("post {id:?} has an empty slug")]
    EmptySlug { id: String },

    /// The slug has `.`, `..` or empty segments, or a backslash, and would
    /// resolve outside the public directory
    #[error("post {id:?} has an invalid slug {slug:?}")]
    InvalidSlug { id: String, slug: String },
}
