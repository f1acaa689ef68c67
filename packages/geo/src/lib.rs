#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic derivations for peak records.
//!
//! Everything in this crate is a pure function of raw extracted text:
//! coordinate strings, elevation strings with their original unit suffix,
//! and free-text administrative locations. Nothing here performs I/O, so
//! derived values can be recomputed on every call and always agree with
//! the raw fields they came from.

pub mod coords;
pub mod countries;
pub mod resolve;

pub use coords::parse_coordinates;
pub use resolve::{
    ResolvedLocation, SizeClass, elevation_feet, elevation_meters, resolve_location, size_class,
    state_of,
};
