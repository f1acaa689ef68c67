//! Free-text coordinate parsing.
//!
//! Wikipedia infoboxes present coordinates in two notations: a compact
//! decimal form (`45.8326°N 6.8652°E`, the `geo-dec` span) and a
//! degrees-minutes-seconds form (`27°59′17″N 86°55′31″E`). Both map to a
//! signed decimal `(latitude, longitude)` pair; south and west are
//! negative.

use std::sync::LazyLock;

use regex::Regex;

/// Degrees-minutes-seconds pattern: latitude group then longitude group.
static DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)°(\d+)′(\d+)″([NS]) (\d+)°(\d+)′(\d+)″([EW])").expect("valid regex")
});

/// Parses a coordinate string into a `(latitude, longitude)` pair.
///
/// Tries the decimal-compact notation first, then degrees-minutes-seconds.
/// Returns `None` for anything else; unparsable coordinates are an absent
/// value for one record, never a pipeline error.
#[must_use]
pub fn parse_coordinates(text: &str) -> Option<(f64, f64)> {
    parse_decimal(text).or_else(|| parse_dms(text))
}

/// Decimal-compact form: two space-separated tokens, each ending in a
/// hemisphere letter, degree symbols ignored.
fn parse_decimal(text: &str) -> Option<(f64, f64)> {
    let stripped = text.replace('°', "");
    let parts: Vec<&str> = stripped.split(' ').collect();
    if parts.len() != 2 {
        return None;
    }
    let latitude = hemisphere_value(parts[0], 'N', 'S')?;
    let longitude = hemisphere_value(parts[1], 'E', 'W')?;
    Some((latitude, longitude))
}

/// Parses one decimal token, negating for the `negative` hemisphere.
fn hemisphere_value(token: &str, positive: char, negative: char) -> Option<f64> {
    if let Some(value) = token.strip_suffix(negative) {
        return value.trim().parse::<f64>().ok().map(|v| -v);
    }
    let value = token.strip_suffix(positive).unwrap_or(token);
    value.trim().parse::<f64>().ok()
}

/// Degrees-minutes-seconds form, converted via `deg + min/60 + sec/3600`.
fn parse_dms(text: &str) -> Option<(f64, f64)> {
    let caps = DMS_RE.captures(text)?;

    let component = |deg: usize, min: usize, sec: usize| -> Option<f64> {
        let d: f64 = caps[deg].parse().ok()?;
        let m: f64 = caps[min].parse().ok()?;
        let s: f64 = caps[sec].parse().ok()?;
        Some(d + m / 60.0 + s / 3600.0)
    };

    let mut latitude = component(1, 2, 3)?;
    if &caps[4] == "S" {
        latitude = -latitude;
    }

    let mut longitude = component(5, 6, 7)?;
    if &caps[8] == "W" {
        longitude = -longitude;
    }

    Some((latitude, longitude))
}
