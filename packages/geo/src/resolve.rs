//! Derivations from raw infobox text.
//!
//! Country, continent, state, size class, and unit conversions are all
//! recomputed from the raw `location`/`elevation` strings on every call.
//! Country and continent are resolved together in one step so the pair can
//! never disagree.

use crate::countries;

/// Conversion factor between meters and feet.
const FEET_PER_METER: f64 = 3.28084;

/// Substrings scrubbed from a country token before lookup.
const NOISE_TOKENS: &[&str] = &["inland", "Inland", "northern", "Northern"];

/// A country/continent pair resolved from a location string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// Canonical country name.
    pub country: String,
    /// Continent display name.
    pub continent: String,
}

/// Marker-size bucket derived from elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// The `marker-size` property value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Resolves the country and continent from a free-text location.
///
/// Takes the last comma-separated segment, strips footnote brackets,
/// trailing parentheticals, `" and "`-joined alternatives, and known noise
/// tokens, applies a small alias table, then resolves against the country
/// reference data. Returns `None` when nothing matches.
#[must_use]
pub fn resolve_location(location: &str) -> Option<ResolvedLocation> {
    let mut token = location
        .rsplit(", ")
        .next()?
        .trim()
        .split('[')
        .next()?
        .split('(')
        .next()?
        .split(" and ")
        .next()?
        .trim()
        .to_owned();

    for noise in NOISE_TOKENS {
        if token.contains(noise) {
            token = token.replace(noise, "");
        }
    }

    let token = match token.trim().to_lowercase().as_str() {
        "england" => "United Kingdom".to_owned(),
        "us" | "u.s." => "United States".to_owned(),
        _ => token.trim().to_owned(),
    };

    let country = countries::search(&token)?;
    Some(ResolvedLocation {
        country: country.name.to_owned(),
        continent: country.continent.to_owned(),
    })
}

/// Returns the state/region segment of a location.
///
/// Present only when the location splits into exactly three
/// comma-separated parts ("City, State, Country").
#[must_use]
pub fn state_of(location: &str) -> Option<String> {
    let parts: Vec<&str> = location.split(", ").collect();
    if parts.len() == 3 {
        Some(parts[1].to_owned())
    } else {
        None
    }
}

/// Buckets a raw elevation string into a marker-size class.
///
/// The unit suffix is stripped but the magnitude is NOT converted before
/// bucketing, so "4200 ft" and "4200 m" land in the same class. That
/// matches the upstream data this tree was built against; tests pin the
/// behavior so changing it is a deliberate act.
#[must_use]
pub fn size_class(elevation: &str) -> Option<SizeClass> {
    let mut value = elevation.trim();
    for suffix in ["ft", "m", "feet"] {
        if let Some(stripped) = value.strip_suffix(suffix) {
            value = stripped;
        }
    }
    let value = value.replace(',', "");
    let magnitude: i64 = value.trim().split('.').next()?.parse().ok()?;

    Some(if magnitude < 600 {
        SizeClass::Small
    } else if magnitude < 4200 {
        SizeClass::Medium
    } else {
        SizeClass::Large
    })
}

/// Elevation in feet, converting from meters when the raw unit differs.
#[must_use]
pub fn elevation_feet(elevation: &str) -> Option<f64> {
    match parse_elevation(elevation)? {
        (value, Unit::Feet) => Some(value),
        (value, Unit::Meters) => Some(value * FEET_PER_METER),
    }
}

/// Elevation in meters, converting from feet when the raw unit differs.
#[must_use]
pub fn elevation_meters(elevation: &str) -> Option<f64> {
    match parse_elevation(elevation)? {
        (value, Unit::Feet) => Some(value / FEET_PER_METER),
        (value, Unit::Meters) => Some(value),
    }
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Feet,
    Meters,
}

/// Splits a raw elevation string into numeric value and declared unit.
///
/// Thousands separators and footnote brackets are dropped; a missing or
/// unrecognized suffix yields `None`.
fn parse_elevation(elevation: &str) -> Option<(f64, Unit)> {
    let cleaned = elevation.replace(',', "");
    let cleaned = cleaned.trim();

    let (value, unit) = if let Some(v) = cleaned.strip_suffix("ft") {
        (v, Unit::Feet)
    } else if let Some(v) = cleaned.strip_suffix('m') {
        (v, Unit::Meters)
    } else {
        return None;
    };

    let value: f64 = value.split('[').next()?.trim().parse().ok()?;
    Some((value, unit))
}
