//! Post model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::helpers::parse_date;

/// A blog post as handed to the home page.
///
/// `date` is kept as the raw front-matter text; it is parsed when the
/// collection is validated and again whenever posts are ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque identifier, unique across the collection
    pub id: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: String,

    /// Path segment the post is published under, unique across the collection
    pub slug: String,

    /// Short summary shown under the title on the home page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rendered HTML body
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,

    /// Source file path relative to the posts directory
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

impl Post {
    /// Create a post with the fields the home page needs
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            slug: slug.into(),
            description: None,
            content: String::new(),
            source: String::new(),
        }
    }

    /// Builder-style setter for the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Parse `date`, failing with [`DataError::InvalidDate`] when it is not a date
    pub fn parsed_date(&self) -> Result<DateTime<FixedOffset>, DataError> {
        parse_date(&self.date).ok_or_else(|| DataError::InvalidDate {
            id: self.id.clone(),
            value: self.date.clone(),
        })
    }
}
