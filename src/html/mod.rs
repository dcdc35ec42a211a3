//! Basic HTML structure and metadata extraction, built on the `scraper`
//! crate's CSS-selector API.

pub mod metadata;
pub mod structure;
