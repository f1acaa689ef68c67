#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Link discovery over mountain list pages.
//!
//! A breadth-first walk over list/category pages that yields confirmed
//! peak article URLs. Cheap syntactic predicates ([`link`]) prune the
//! link graph; the expensive confirmation step fetches a candidate page
//! and checks its infobox for the mandatory peak labels before the URL is
//! handed to the extractor.

pub mod link;
pub mod traverse;

pub use traverse::Crawler;

/// Errors that can occur during traversal.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The fetch gateway failed outright.
    #[error("fetch error: {0}")]
    Fetch(#[from] peak_map_fetch::FetchError),
}
