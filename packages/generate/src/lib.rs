#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! GeoJSON feature generation and persistence.
//!
//! Projects a completed [`Peak`] record into a point-geometry GeoJSON
//! `Feature` and writes it, pretty-printed, into a directory tree keyed
//! by derived continent/country/(state). The feature is a disposable
//! view rebuilt on every save; re-running the pipeline overwrites the
//! file at the same computed path.

use std::path::{Path, PathBuf};

use deunicode::deunicode;
use peak_map_extract::Peak;
use peak_map_geo::{ResolvedLocation, SizeClass};

/// Errors that can occur while building or persisting a feature.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The record was never extracted; persisting it would emit an empty
    /// feature.
    #[error("incomplete record: {name} ({url})")]
    Incomplete { name: String, url: String },

    /// The raw location string did not resolve to a known country.
    #[error("unresolvable location for {name} ({url}): {location:?}")]
    UnresolvedLocation {
        name: String,
        url: String,
        location: Option<String>,
    },

    /// A directory or file write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the feature failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Builds the GeoJSON `Feature` projection of a completed peak.
///
/// Coordinates may be null (unparsable raw text is not fatal), but an
/// unresolvable country is: the output tree is keyed by it.
///
/// # Errors
///
/// Returns [`GenerateError::UnresolvedLocation`] if no country can be
/// derived from the record's location.
pub fn build_feature(peak: &Peak) -> Result<serde_json::Value, GenerateError> {
    let resolved = resolve(peak)?;
    let (latitude, longitude) = match peak.coordinates() {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    let mut feature = serde_json::json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [longitude, latitude]
        },
        "properties": {
            "feet": peak.elevation_feet(),
            "meters": peak.elevation_meters(),
            "latitude": latitude,
            "longitude": longitude,
            "name": peak.name,
            "countries": [resolved.country],
            "continent": resolved.continent,
            "marker-size": peak.size().map(SizeClass::as_str),
            "marker-symbol": "triangle"
        }
    });

    if let Some(state) = peak.state()
        && let Some(properties) = feature["properties"].as_object_mut()
    {
        properties.insert("states".to_owned(), serde_json::json!([state]));
    }

    Ok(feature)
}

/// Computes the output path of a peak, relative to the output root.
///
/// `{continent}/{country}/[{state}/]{name}.geojson`, every segment
/// lowercased, spaces hyphenated, non-ASCII transliterated. A few
/// segment overrides correct upstream naming quirks; the state segment
/// is included only for United States peaks.
///
/// # Errors
///
/// Returns [`GenerateError::UnresolvedLocation`] if no country can be
/// derived from the record's location.
pub fn feature_path(peak: &Peak) -> Result<PathBuf, GenerateError> {
    let resolved = resolve(peak)?;

    let mut continent = slug(&resolved.continent);
    if continent == "oceania" {
        continent = "australia-oceania".to_owned();
    }

    let mut country = slug(&resolved.country);
    if country == "virgin-islands,-british" {
        country = "british-virgin-islands".to_owned();
    }
    if country == "wyoming" {
        // Bare-state location miscast as a country upstream.
        country = "united-states".to_owned();
    }

    let name = slug(&peak.name);

    let mut path = PathBuf::from(continent).join(&country);
    if country == "united-states"
        && let Some(state) = peak.state()
    {
        path = path.join(slug(&state));
    }
    Ok(path.join(format!("{name}.geojson")))
}

/// Writes the peak's feature file under `out_root`, overwriting any
/// previous version, and returns the full path written.
///
/// # Errors
///
/// Returns [`GenerateError::Incomplete`] for a record that was never
/// extracted, [`GenerateError::UnresolvedLocation`] if no country can be
/// derived, or an I/O error from the write itself.
pub fn save(peak: &Peak, out_root: &Path) -> Result<PathBuf, GenerateError> {
    if !peak.complete {
        return Err(GenerateError::Incomplete {
            name: peak.name.clone(),
            url: peak.url.clone(),
        });
    }

    let path = out_root.join(feature_path(peak)?);
    let feature = build_feature(peak)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut body = serde_json::to_string_pretty(&feature)?;
    body.push('\n');
    std::fs::write(&path, body)?;

    log::info!("Saved {} to {}", peak.name, path.display());
    Ok(path)
}

/// Resolves the record's country/continent or reports which record
/// failed.
fn resolve(peak: &Peak) -> Result<ResolvedLocation, GenerateError> {
    peak.resolved_location()
        .ok_or_else(|| GenerateError::UnresolvedLocation {
            name: peak.name.clone(),
            url: peak.url.clone(),
            location: peak.location.clone(),
        })
}

/// Path-segment form of a display name: hyphenated, lowercased,
/// transliterated to ASCII.
fn slug(text: &str) -> String {
    deunicode(&text.replace(' ', "-").to_lowercase())
}
