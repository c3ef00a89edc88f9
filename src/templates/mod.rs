//! Built-in templates using the Tera template engine
//!
//! The layout, home and post templates are embedded in the binary, so a
//! site needs no theme directory to build.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{full_url_for, html_escape, url_for};
use crate::home::Fragment;

/// Template renderer with the embedded default theme
pub struct TemplateRenderer {
    tera: Tera,
}

/// Link to a neighbouring post
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub href: String,
}

impl From<&Fragment> for NavPost {
    fn from(fragment: &Fragment) -> Self {
        Self {
            title: fragment.title.clone(),
            href: fragment.href.clone(),
        }
    }
}

/// Everything a single post page needs
#[derive(Debug, Clone, Serialize)]
pub struct PostPage<'a> {
    pub post: &'a Fragment,
    pub content: &'a str,
    pub newer: Option<NavPost>,
    pub older: Option<NavPost>,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escaping is explicit through the `escape_html` filter, which leaves
        // slashes in URLs readable
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("default/layout.html")),
            ("home.html", include_str!("default/home.html")),
            ("post.html", include_str!("default/post.html")),
        ])?;

        tera.register_filter("escape_html", escape_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the home page from its fragments
    pub fn render_home(&self, config: &SiteConfig, posts: &[Fragment]) -> Result<String> {
        let mut context = base_context(config);
        context.insert("posts", posts);
        self.render("home.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, config: &SiteConfig, page: &PostPage<'_>) -> Result<String> {
        let mut context = base_context(config);
        context.insert("post", page.post);
        context.insert("content", page.content);
        context.insert("newer", &page.newer);
        context.insert("older", &page.older);
        self.render("post.html", &context)
    }
}

/// Tera filter: escape HTML special characters
fn escape_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("config", config);
    context.insert("root", &url_for(config, ""));
    context.insert("home_url", &full_url_for(config, ""));
    context.insert("generator_version", env!("CARGO_PKG_VERSION"));
    context
}
