//! Generator module - writes the static site using the built-in templates

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{validate_posts, Post};
use crate::home::{order_posts, Fragment, HomePage};
use crate::templates::{NavPost, PostPage, TemplateRenderer};
use crate::Site;

/// Name of the JSON dump of the home page, written next to index.html
pub const CONTENT_JSON: &str = "content.json";

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post]) -> Result<()> {
        // Slugs become output paths, so the collection is checked before any write
        validate_posts(posts)?;

        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_source_assets()?;

        let home = HomePage::new(&self.site.config);
        let ordered = order_posts(posts)?;
        let fragments: Vec<Fragment> = ordered.iter().map(|dated| home.fragment(dated)).collect();

        self.generate_home_page(&fragments)?;

        for (i, dated) in ordered.iter().enumerate() {
            let page = PostPage {
                post: &fragments[i],
                content: &dated.post.content,
                newer: i.checked_sub(1).map(|j| NavPost::from(&fragments[j])),
                older: fragments.get(i + 1).map(NavPost::from),
            };
            self.generate_post_page(&dated.post.slug, &page)?;
        }

        self.generate_content_json(&fragments)?;

        tracing::info!("Wrote home page and {} post pages", fragments.len());

        Ok(())
    }

    fn generate_home_page(&self, fragments: &[Fragment]) -> Result<()> {
        let html = self.renderer.render_home(&self.site.config, fragments)?;
        write_file(&self.site.public_dir.join("index.html"), &html)
    }

    fn generate_post_page(&self, slug: &str, page: &PostPage<'_>) -> Result<()> {
        let html = self.renderer.render_post(&self.site.config, page)?;
        let dest = self
            .site
            .public_dir
            .join(slug.trim_matches('/'))
            .join("index.html");
        write_file(&dest, &html)
    }

    fn generate_content_json(&self, fragments: &[Fragment]) -> Result<()> {
        let json = serde_json::to_string_pretty(fragments)?;
        write_file(&self.site.public_dir.join(CONTENT_JSON), &json)
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        // Underscore directories hold content, not assets
        let walker = WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('_'));

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            tracing::debug!("Copied asset {:?}", relative);
        }

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::debug!("Generated: {:?}", path);
    Ok(())
}
