//! Generate static files

use anyhow::Result;
use std::time::Instant;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::server;
use crate::Site;

/// Load posts and write the site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let posts = ContentLoader::new(site).load_posts()?;
    tracing::info!("Loaded {} posts", posts.len());

    Generator::new(site)?.generate(&posts)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch the source tree and regenerate on every change
pub async fn watch(site: &Site) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    server::watch_and_rebuild(site.clone(), None).await
}
