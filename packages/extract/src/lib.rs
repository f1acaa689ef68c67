#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Peak article extraction.
//!
//! Parses the semi-structured infobox of a mountain article into a typed
//! [`Peak`] record: elevation, prominence, coordinates, parent range, and
//! administrative location. Extraction is best-effort — a record with
//! missing optional fields is still marked complete; only an unavailable
//! page or a disambiguation/list article is a hard failure.

pub mod infobox;
pub mod peak;

pub use peak::{Peak, has_peak_infobox};

/// Errors that can occur while extracting a peak article.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The fetch gateway failed outright.
    #[error("fetch error: {0}")]
    Fetch(#[from] peak_map_fetch::FetchError),

    /// The page is unavailable at its expected location (missing or
    /// redirected elsewhere).
    #[error("page unavailable: {0}")]
    Unavailable(String),

    /// The page is a disambiguation or list article, not a peak.
    #[error("not a peak article: {0}")]
    NotAPeak(String),
}
