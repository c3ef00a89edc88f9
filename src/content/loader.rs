//! Content loader - loads posts from the source directory

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post};
use crate::error::DataError;
use crate::helpers::is_contained_path;
use crate::Site;

/// Loads posts from `<source_dir>/_posts`
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self {
            site,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Directory the posts are read from
    pub fn posts_dir(&self) -> PathBuf {
        self.site.source_dir.join("_posts")
    }

    /// Load and validate every post.
    ///
    /// Files are visited in path order, which becomes the collection's input
    /// order. Unreadable files are skipped with a warning; a collection that
    /// breaks the data contract is an error.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let posts_dir = self.posts_dir();
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_post(&posts_dir, path) {
                Ok(Some(post)) => {
                    tracing::debug!("Loaded post {:?} from {:?}", post.id, path);
                    posts.push(post);
                }
                Ok(None) => tracing::debug!("Skipping unpublished post {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
            }
        }

        validate_posts(&posts)?;

        Ok(posts)
    }

    /// Load a single post, or `None` when it is unpublished and drafts are off
    fn load_post(&self, posts_dir: &Path, path: &Path) -> Result<Option<Post>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if !fm.published && !self.site.config.render_drafts {
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let source = path
            .strip_prefix(posts_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let id = fm.id.unwrap_or_else(|| strip_markdown_ext(&source).to_string());
        let slug = fm
            .slug
            .map(|s| s.trim_matches('/').to_string())
            .unwrap_or_else(|| slug::slugify(&stem));
        let title = fm.title.unwrap_or(stem);

        // Without a front-matter date, fall back to the file's mtime
        let date = match fm.date {
            Some(date) => date,
            None => {
                let modified = fs::metadata(path)?.modified()?;
                DateTime::<Utc>::from(modified).to_rfc3339()
            }
        };

        let description = fm
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let mut post = Post::new(id, title, date, slug);
        post.description = description;
        post.content = self.renderer.render(body);
        post.source = source;

        Ok(Some(post))
    }
}

/// Check the invariants the home page depends on: parseable dates,
/// unique ids, and unique non-empty slugs that stay inside the public
/// directory.
pub fn validate_posts(posts: &[Post]) -> Result<(), DataError> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(posts.len());
    let mut slugs: HashMap<&str, &str> = HashMap::with_capacity(posts.len());

    for post in posts {
        post.parsed_date()?;

        if !ids.insert(post.id.as_str()) {
            return Err(DataError::DuplicateId {
                id: post.id.clone(),
            });
        }

        let slug = post.slug.trim_matches('/');
        if slug.is_empty() {
            return Err(DataError::EmptySlug {
                id: post.id.clone(),
            });
        }
        if !is_contained_path(slug) {
            return Err(DataError::InvalidSlug {
                id: post.id.clone(),
                slug: post.slug.clone(),
            });
        }
        if let Some(first) = slugs.insert(slug, post.id.as_str()) {
            return Err(DataError::DuplicateSlug {
                slug: slug.to_string(),
                first: first.to_string(),
                second: post.id.clone(),
            });
        }
    }

    Ok(())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn strip_markdown_ext(source: &str) -> &str {
    source
        .strip_suffix(".markdown")
        .or_else(|| source.strip_suffix(".md"))
        .unwrap_or(source)
}
