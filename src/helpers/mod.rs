//! Helper functions shared by the renderer, generator and CLI
//!
//! Dates are parsed and formatted here, and site-relative links are built
//! from the configured root.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
