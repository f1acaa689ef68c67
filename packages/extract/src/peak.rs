//! The peak record and its extraction logic.
//!
//! A [`Peak`] starts as name + URL, is filled in from one article fetch
//! (plus at most one supplementary parent-range fetch), and is frozen once
//! `complete`. Raw fields keep their original formatting — unit suffixes,
//! thousands separators, footnote markers — and everything derived
//! (coordinates, country, size) is recomputed from them on demand.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use peak_map_fetch::PageCache;
use peak_map_geo::{ResolvedLocation, SizeClass};
use percent_encoding::percent_decode_str;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::ExtractError;
use crate::infobox;

/// Body marker identifying a disambiguation/list article.
const LIST_ARTICLE_MARKER: &str = "Wikimedia list article";

/// Infobox labels the extractor recognizes. Isolation and Territory are
/// accepted but carry no dedicated field.
const RECOGNIZED_KEYS: &[&str] = &[
    "Elevation",
    "Prominence",
    "Parent range",
    "Isolation",
    "Coordinates",
    "Country",
    "Territory",
];

/// Labels that must all be present for a page to count as a peak article.
const REQUIRED_KEYS: &[&str] = &["Elevation", "Coordinates", "Parent range"];

/// Sub-national mentions scrubbed from an unlinked Country cell.
const COUNTRY_NOISE: &[&str] = &["nuevo-león", "méxico", "veracruz"];

static GEO_DEC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.geo-dec").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));
static LOCMAP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.locmap").expect("valid selector"));

/// A mountain peak record, mutable during extraction, frozen once
/// `complete`.
#[derive(Debug, Clone, Serialize)]
pub struct Peak {
    /// Display name, cleaned of disambiguation suffixes and underscores.
    pub name: String,
    /// Canonical article URL; the identity key for deduplication.
    pub url: String,
    /// True once extraction has run, even if fields remain absent.
    pub complete: bool,
    /// Verbatim coordinate text as found on the page.
    pub raw_coordinates: Option<String>,
    /// Elevation with its original unit suffix ("m"/"ft"/"feet").
    pub elevation: Option<String>,
    /// Prominence, same raw-unit convention as elevation.
    pub prominence: Option<String>,
    /// Name of the containing mountain range.
    pub parent_range: Option<String>,
    /// Free-text administrative location.
    pub location: Option<String>,
    /// Flattened infobox of the parent range's own article.
    pub parent_data: Option<BTreeMap<String, String>>,
}

impl Peak {
    /// Creates an empty record from a display name and article URL.
    ///
    /// Underscores become spaces and a parenthetical disambiguation
    /// suffix like "(mountain)" is dropped.
    #[must_use]
    pub fn new(name: &str, url: &str) -> Self {
        let name = name.replace('_', " ");
        let name = name.split('(').next().unwrap_or(&name).trim().to_owned();
        Self {
            name,
            url: url.to_owned(),
            complete: false,
            raw_coordinates: None,
            elevation: None,
            prominence: None,
            parent_range: None,
            location: None,
            parent_data: None,
        }
    }

    /// Creates a record from an article URL alone, deriving the display
    /// name from the percent-decoded title segment.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let title = url.rsplit('/').next().unwrap_or(url);
        let title = percent_decode_str(title).decode_utf8_lossy();
        Self::new(&title, url)
    }

    /// URL of the parent range's own article, if a parent range is known.
    #[must_use]
    pub fn parent_range_url(&self) -> Option<String> {
        let range = self.parent_range.as_ref()?;
        Some(format!(
            "https://en.wikipedia.org/wiki/{}",
            range.replace(' ', "_")
        ))
    }

    /// Fills in the record from its article page.
    ///
    /// Fetches the page (cached), parses the infobox, and applies the
    /// per-field cleaning rules; if a parent range is found, fetches that
    /// one extra page for supplementary location data. Partial data is
    /// success — the record is marked complete regardless of how many
    /// optional fields were found.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Unavailable`] if the page cannot be fetched,
    /// [`ExtractError::NotAPeak`] if it is a disambiguation/list article.
    pub async fn extract(&mut self, cache: &PageCache) -> Result<(), ExtractError> {
        let body = cache
            .get(&self.url)
            .await?
            .ok_or_else(|| ExtractError::Unavailable(self.url.clone()))?;
        if body.contains(LIST_ARTICLE_MARKER) {
            return Err(ExtractError::NotAPeak(self.url.clone()));
        }

        let article = parse_article(&body, &self.name);
        self.raw_coordinates = article.raw_coordinates;
        self.elevation = article.elevation;
        self.prominence = article.prominence;
        self.parent_range = article.parent_range;
        self.location = article.location;

        // One supplementary fetch, one level deep only: the parent
        // range's own infobox sometimes carries the State the peak
        // article omits.
        if let Some(url) = self.parent_range_url()
            && let Some(parent_body) = cache.get(&url).await?
        {
            let data = parse_parent(&parent_body);
            if let Some(state) = data.get("State") {
                self.location = Some(if state == "Hawaii" {
                    // Disambiguates the US state from the country token.
                    "Hawaii, United States".to_owned()
                } else {
                    state.clone()
                });
            }
            self.parent_data = Some(data);
        }

        if self.location.is_none() {
            self.location = article.locmap_caption;
            if self.location.is_some() {
                log::debug!("{}: location recovered from locmap caption", self.name);
            }
        }

        self.complete = true;
        Ok(())
    }

    /// Parsed decimal coordinates, if the raw text is parsable.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        peak_map_geo::parse_coordinates(self.raw_coordinates.as_deref()?)
    }

    /// Marker-size class derived from the raw elevation.
    #[must_use]
    pub fn size(&self) -> Option<SizeClass> {
        peak_map_geo::size_class(self.elevation.as_deref()?)
    }

    /// Elevation converted to feet.
    #[must_use]
    pub fn elevation_feet(&self) -> Option<f64> {
        peak_map_geo::elevation_feet(self.elevation.as_deref()?)
    }

    /// Elevation converted to meters.
    #[must_use]
    pub fn elevation_meters(&self) -> Option<f64> {
        peak_map_geo::elevation_meters(self.elevation.as_deref()?)
    }

    /// Country and continent resolved from the raw location.
    #[must_use]
    pub fn resolved_location(&self) -> Option<ResolvedLocation> {
        peak_map_geo::resolve_location(self.location.as_deref()?)
    }

    /// State/region segment of the raw location, when present.
    #[must_use]
    pub fn state(&self) -> Option<String> {
        peak_map_geo::state_of(self.location.as_deref()?)
    }

    /// The raw record plus its cheap derivations, for diagnostics.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "url": self.url,
            "complete": self.complete,
            "raw_coordinates": self.raw_coordinates,
            "coordinates": self.coordinates(),
            "elevation": self.elevation,
            "prominence": self.prominence,
            "parent_range": self.parent_range,
            "location": self.location,
            "size": self.size().map(SizeClass::as_str),
        })
    }
}

/// Returns whether a page body carries the mandatory peak infobox labels
/// (Elevation, Coordinates, Parent range).
///
/// This is the authoritative peak check; URL heuristics alone produce
/// false positives.
#[must_use]
pub fn has_peak_infobox(body: &str) -> bool {
    let html = Html::parse_document(body);
    let keys: Vec<String> = infobox::labeled_rows(&html)
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    REQUIRED_KEYS
        .iter()
        .all(|required| keys.iter().any(|k| k == required))
}

/// Raw fields pulled out of one article page.
struct ParsedArticle {
    raw_coordinates: Option<String>,
    elevation: Option<String>,
    prominence: Option<String>,
    parent_range: Option<String>,
    location: Option<String>,
    locmap_caption: Option<String>,
}

/// Parses one peak article body into its raw fields.
fn parse_article(body: &str, name: &str) -> ParsedArticle {
    let html = Html::parse_document(body);

    let mut article = ParsedArticle {
        raw_coordinates: None,
        elevation: None,
        prominence: None,
        parent_range: None,
        location: infobox::flatten(&html).remove("Location"),
        locmap_caption: None,
    };

    for (key, data) in infobox::labeled_rows(&html) {
        if !RECOGNIZED_KEYS.contains(&key.as_str()) {
            continue;
        }
        match key.as_str() {
            "Coordinates" => {
                // Prefer the embedded decimal span; the full cell text
                // mixes several notations.
                let value = data
                    .select(&GEO_DEC)
                    .next()
                    .map_or_else(|| infobox::text_of(data), infobox::text_of);
                article.raw_coordinates = Some(value);
            }
            "Elevation" => article.elevation = Some(clean_measurement(data)),
            "Prominence" => article.prominence = Some(clean_measurement(data)),
            "Country" => article.location = Some(country_cell_text(data)),
            "Parent range" => {
                if let Some(link) = data.select(&LINK).next() {
                    article.parent_range = Some(infobox::text_of(link));
                }
            }
            _ => {}
        }
    }

    article.locmap_caption = html.select(&LOCMAP).next().map(|div| {
        let caption = infobox::text_of(div).replace(name, "");
        let caption = caption.rsplit(" / ").next().unwrap_or(&caption).trim().to_owned();
        caption
            .split("Show map of ")
            .next()
            .unwrap_or(&caption)
            .trim()
            .to_owned()
    });

    article
}

/// Flattened infobox of a parent-range article, no field filtering.
fn parse_parent(body: &str) -> BTreeMap<String, String> {
    let html = Html::parse_document(body);
    infobox::flatten(&html)
}

/// Cleans an elevation/prominence cell: truncate at the first parenthesis
/// (drops the secondary-unit conversion), strip non-breaking spaces and a
/// leading "+".
fn clean_measurement(data: ElementRef<'_>) -> String {
    let text = infobox::text_of(data);
    text.split(" (")
        .next()
        .unwrap_or(&text)
        .replace('\u{a0}', "")
        .replace('+', "")
        .trim()
        .to_owned()
}

/// Country cell: prefer the first link's text; otherwise the cell text
/// with known sub-national noise scrubbed.
fn country_cell_text(data: ElementRef<'_>) -> String {
    if let Some(link) = data.select(&LINK).next() {
        return infobox::text_of(link);
    }
    let mut text = infobox::text_of(data);
    for noise in COUNTRY_NOISE {
        if text.contains(noise) {
            text = text.replace(noise, "");
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVEREST: &str = r#"
        <html><body>
        <table class="infobox">
          <tr><th>Location</th><td>Solukhumbu District, Nepal</td></tr>
          <tr>
            <th class="infobox-label">Elevation</th>
            <td class="infobox-data">8,848.86&#160;m (29,031.7&#160;ft)</td>
          </tr>
          <tr>
            <th class="infobox-label">Prominence</th>
            <td class="infobox-data">8,848.86&#160;m (29,031.7&#160;ft)</td>
          </tr>
          <tr>
            <th class="infobox-label">Coordinates</th>
            <td class="infobox-data">
              27°59′17″N 86°55′31″E
              <span class="geo-dec">27.9881°N 86.9250°E</span>
            </td>
          </tr>
          <tr>
            <th class="infobox-label">Parent range</th>
            <td class="infobox-data"><a href="/wiki/Mahalangur_Himal">Mahalangur Himal</a></td>
          </tr>
        </table>
        </body></html>"#;

    #[test]
    fn new_cleans_name() {
        let peak = Peak::new("Ben_Nevis_(mountain)", "https://en.wikipedia.org/wiki/Ben_Nevis");
        assert_eq!(peak.name, "Ben Nevis");
        assert!(!peak.complete);
    }

    #[test]
    fn from_url_derives_decoded_name() {
        let peak = Peak::from_url("https://en.wikipedia.org/wiki/Pic_du_Midi_d%27Ossau");
        assert_eq!(peak.name, "Pic du Midi d'Ossau");
    }

    #[test]
    fn parent_range_url_underscores_the_name() {
        let mut peak = Peak::new("Everest", "https://en.wikipedia.org/wiki/Mount_Everest");
        assert_eq!(peak.parent_range_url(), None);
        peak.parent_range = Some("Mahalangur Himal".to_owned());
        assert_eq!(
            peak.parent_range_url().as_deref(),
            Some("https://en.wikipedia.org/wiki/Mahalangur_Himal")
        );
    }

    #[test]
    fn parses_typed_fields() {
        let article = parse_article(EVEREST, "Mount Everest");
        assert_eq!(article.elevation.as_deref(), Some("8,848.86m"));
        assert_eq!(article.prominence.as_deref(), Some("8,848.86m"));
        assert_eq!(article.raw_coordinates.as_deref(), Some("27.9881°N 86.9250°E"));
        assert_eq!(article.parent_range.as_deref(), Some("Mahalangur Himal"));
        assert_eq!(article.location.as_deref(), Some("Solukhumbu District, Nepal"));
    }

    #[test]
    fn coordinates_fall_back_to_cell_text_without_geo_dec() {
        let page = r#"<table class="infobox"><tr>
            <th class="infobox-label">Coordinates</th>
            <td class="infobox-data">27°59′17″N 86°55′31″E</td>
        </tr></table>"#;
        let article = parse_article(page, "X");
        assert_eq!(article.raw_coordinates.as_deref(), Some("27°59′17″N 86°55′31″E"));
    }

    #[test]
    fn linked_country_sets_location() {
        let page = r#"<table class="infobox"><tr>
            <th class="infobox-label">Country</th>
            <td class="infobox-data"><a href="/wiki/Nepal">Nepal</a> and China</td>
        </tr></table>"#;
        let article = parse_article(page, "X");
        assert_eq!(article.location.as_deref(), Some("Nepal"));
    }

    #[test]
    fn locmap_caption_is_cleaned() {
        let page = r#"
            <div class="locmap">Mount Foo is located in WyomingMount Foo / Wyoming, United StatesShow map of the United States</div>
        "#;
        let article = parse_article(page, "Mount Foo");
        assert_eq!(
            article.locmap_caption.as_deref(),
            Some("Wyoming, United States")
        );
    }

    #[test]
    fn required_labels_confirm_a_peak() {
        assert!(has_peak_infobox(EVEREST));
    }

    #[test]
    fn missing_all_required_labels_is_not_a_peak() {
        let page = "<table class=\"infobox\"><tr><th>Location</th><td>Nowhere</td></tr></table>";
        assert!(!has_peak_infobox(page));
    }

    #[tokio::test]
    async fn extract_from_cached_pages_fills_record() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let url = "https://en.wikipedia.org/wiki/Mount_Everest";
        seed(&cache, url, EVEREST);
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Mahalangur_Himal",
            r#"<table class="infobox">
                <tr><th>Countries</th><td>Nepal and China</td></tr>
            </table>"#,
        );

        let mut peak = Peak::from_url(url);
        peak.extract(&cache).await.unwrap();

        assert!(peak.complete);
        assert_eq!(peak.elevation.as_deref(), Some("8,848.86m"));
        assert_eq!(peak.location.as_deref(), Some("Solukhumbu District, Nepal"));
        let (lat, lon) = peak.coordinates().unwrap();
        assert!((lat - 27.9881).abs() < 1e-6);
        assert!((lon - 86.925).abs() < 1e-6);
        assert!(peak.parent_data.is_some());
    }

    #[tokio::test]
    async fn parent_state_overrides_location() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let url = "https://en.wikipedia.org/wiki/Mauna_Kea";
        seed(
            &cache,
            url,
            r#"<table class="infobox">
                <tr><th class="infobox-label">Elevation</th>
                    <td class="infobox-data">4,207.3&#160;m (13,803&#160;ft)</td></tr>
                <tr><th class="infobox-label">Parent range</th>
                    <td class="infobox-data"><a href="/wiki/Hawaiian_Islands">Hawaiian Islands</a></td></tr>
            </table>"#,
        );
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Hawaiian_Islands",
            r#"<table class="infobox">
                <tr><th>State</th><td>Hawaii</td></tr>
            </table>"#,
        );

        let mut peak = Peak::from_url(url);
        peak.extract(&cache).await.unwrap();
        assert_eq!(peak.location.as_deref(), Some("Hawaii, United States"));
    }

    #[tokio::test]
    async fn list_article_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());
        let url = "https://en.wikipedia.org/wiki/List_of_peaks";
        seed(&cache, url, "<html>This is a Wikimedia list article.</html>");

        let mut peak = Peak::from_url(url);
        assert!(matches!(
            peak.extract(&cache).await,
            Err(ExtractError::NotAPeak(_))
        ));
        assert!(!peak.complete);
    }

    #[tokio::test]
    async fn redirect_sentinel_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());
        let url = "https://en.wikipedia.org/wiki/Moved_Peak";
        seed(&cache, url, "redirect");

        let mut peak = Peak::from_url(url);
        assert!(matches!(
            peak.extract(&cache).await,
            Err(ExtractError::Unavailable(_))
        ));
    }

    fn seed(cache: &PageCache, url: &str, body: &str) {
        let path = cache.cache_path(url);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }
}
