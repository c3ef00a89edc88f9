//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::ContentLoader;
use crate::home::{Fragment, HomePage};
use crate::Site;

/// Print posts in the order the home page shows them
pub fn run(site: &Site) -> Result<()> {
    let posts = ContentLoader::new(site).load_posts()?;
    let fragments = HomePage::new(&site.config).render(&posts)?;

    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &fragments)?;
    Ok(())
}

fn write_listing<W: Write>(out: &mut W, fragments: &[Fragment]) -> Result<()> {
    writeln!(out, "Posts ({}):", fragments.len())?;
    for fragment in fragments {
        writeln!(
            out,
            "  {} - {} [{}]",
            fragment.date, fragment.title, fragment.href
        )?;
    }
    Ok(())
}
