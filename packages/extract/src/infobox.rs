//! Infobox table parsing.
//!
//! An infobox is a `table.infobox` of header/data rows. Articles without
//! one (older markup) fall back to scanning every table. Two views are
//! provided: a flattened first-occurrence-wins map of every `th`/`td`
//! pair, and the ordered label/data rows (`th.infobox-label` /
//! `td.infobox-data`) that carry the typed peak fields.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static INFOBOX_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.infobox").expect("valid selector"));
static ANY_TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("valid selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid selector"));
static LABEL_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th.infobox-label").expect("valid selector"));
static LABELED_DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.infobox-data").expect("valid selector"));

/// Joined text content of an element, trimmed.
#[must_use]
pub fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_owned()
}

/// Tables to extract from: infobox-classed tables, else every table.
#[must_use]
pub fn tables(html: &Html) -> Vec<ElementRef<'_>> {
    let infoboxes: Vec<ElementRef<'_>> = html.select(&INFOBOX_TABLE).collect();
    if infoboxes.is_empty() {
        html.select(&ANY_TABLE).collect()
    } else {
        infoboxes
    }
}

/// Flattens every header/data row across the located tables into a map.
///
/// The first occurrence of a key wins, so a page-level field like
/// "Location" is not clobbered by a later nested table.
#[must_use]
pub fn flatten(html: &Html) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for table in tables(html) {
        for row in table.select(&ROW) {
            let Some(header) = row.select(&HEADER_CELL).next() else {
                continue;
            };
            let Some(data) = row.select(&DATA_CELL).next() else {
                continue;
            };
            map.entry(text_of(header)).or_insert_with(|| text_of(data));
        }
    }
    map
}

/// Ordered label/data row pairs, with the data cell kept as an element so
/// callers can apply field-specific handling (embedded spans, links).
#[must_use]
pub fn labeled_rows(html: &Html) -> Vec<(String, ElementRef<'_>)> {
    let mut rows = Vec::new();
    for table in tables(html) {
        for row in table.select(&ROW) {
            let Some(label) = row.select(&LABEL_CELL).next() else {
                continue;
            };
            let Some(data) = row.select(&LABELED_DATA_CELL).next() else {
                continue;
            };
            rows.push((text_of(label), data));
        }
    }
    rows
}
