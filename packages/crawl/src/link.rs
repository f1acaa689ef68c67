//! URL normalization and link classification.
//!
//! Pure string predicates over normalized article URLs. They are cheap
//! pre-filters only; the authoritative peak check is the infobox
//! confirmation in [`crate::traverse`].

/// The one source site this crawler understands.
pub const SITE: &str = "https://en.wikipedia.org";

/// Article URL prefix.
const WIKI_PREFIX: &str = "https://en.wikipedia.org/wiki/";

/// Markers that make a URL worth expanding during traversal.
const EXPAND_MARKERS: &[&str] = &[
    "list_of_mountain",
    "lists_of_mountain",
    "list_of_peaks",
    "mountains_of",
];

/// Namespaces that are never expanded or extracted.
const DENY_NAMESPACES: &[&str] = &[
    "talk:",
    "user:",
    "special:",
    "template:",
    "help:",
    "portal:",
    "wikipedia:",
    "file:",
    "draft:",
    "book:",
    "module:",
    "mediawiki:",
];

/// Title prefixes that mark list or range articles, not single peaks.
const LIST_PREFIXES: &[&str] = &["List_of", "Lists_of", "Mountains_of", "Mountain_ranges"];

/// Plural terrain words; a title containing one names a group of
/// features, not a peak.
const PLURAL_TERRAIN: &[&str] = &["ranges", "hills", "mountains", "peaks", "summits"];

/// Resolves a raw `href` into an absolute on-site article URL.
///
/// Protocol-relative and site-relative links are made absolute; the
/// `index.php?title=` edit-link form is translated to the canonical
/// `/wiki/` form; query strings and fragments are stripped. Off-site and
/// unresolvable links return `None`.
#[must_use]
pub fn normalize(href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{rest}")
    } else if href.starts_with('/') {
        format!("{SITE}{href}")
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.to_owned()
    } else {
        return None;
    };

    if !absolute.starts_with(SITE) {
        return None;
    }

    // Edit links point at the same article through index.php.
    if absolute.contains("/w/index.php?")
        && let Some(title) = query_param(&absolute, "title")
    {
        return Some(format!("{WIKI_PREFIX}{title}"));
    }

    let trimmed = absolute.split('#').next().unwrap_or(&absolute);
    let trimmed = trimmed.split('?').next().unwrap_or(trimmed);
    Some(trimmed.to_owned())
}

/// Extracts one query parameter value from a URL.
fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split('?').nth(1)?;
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix(name)
            && let Some(value) = value.strip_prefix('=')
        {
            return Some(value.to_owned());
        }
    }
    None
}

/// Returns whether a URL is a list/category page worth expanding.
///
/// Requires an allow-list marker, no denied namespace, and the source
/// site. Deny wins over allow: a talk page about a mountain list is
/// still a talk page.
#[must_use]
pub fn is_expandable_list(url: &str) -> bool {
    if !url.starts_with(SITE) {
        return false;
    }
    let lower = url.to_lowercase();
    if DENY_NAMESPACES.iter().any(|ns| lower.contains(ns)) {
        return false;
    }
    EXPAND_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Returns whether a URL looks like a single peak article.
///
/// Syntactic heuristics only: plain article title, no namespace, no
/// list/range prefix, no plural terrain word, and no trailing "s"
/// (plural range names). False positives are caught by the infobox
/// confirmation; false negatives are the accepted cost of the trailing-s
/// rule.
#[must_use]
pub fn is_candidate_peak(url: &str) -> bool {
    let Some(title) = url.strip_prefix(WIKI_PREFIX) else {
        return false;
    };
    if title.is_empty() || title.contains(':') || title.contains('/') {
        return false;
    }
    if LIST_PREFIXES.iter().any(|prefix| title.starts_with(prefix)) {
        return false;
    }
    let lower = title.to_lowercase();
    if PLURAL_TERRAIN.iter().any(|word| lower.contains(word)) {
        return false;
    }
    !lower.ends_with('s')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_site_relative() {
        assert_eq!(
            normalize("/wiki/Mount_Rainier").as_deref(),
            Some("https://en.wikipedia.org/wiki/Mount_Rainier")
        );
    }

    #[test]
    fn normalizes_protocol_relative() {
        assert_eq!(
            normalize("//en.wikipedia.org/wiki/K2").as_deref(),
            Some("https://en.wikipedia.org/wiki/K2")
        );
    }

    #[test]
    fn translates_index_php_edit_links() {
        assert_eq!(
            normalize("/w/index.php?title=Mount_Rainier&action=edit").as_deref(),
            Some("https://en.wikipedia.org/wiki/Mount_Rainier")
        );
    }

    #[test]
    fn strips_fragments_and_queries() {
        assert_eq!(
            normalize("/wiki/K2#Climbing_history").as_deref(),
            Some("https://en.wikipedia.org/wiki/K2")
        );
        assert_eq!(
            normalize("https://en.wikipedia.org/wiki/K2?uselang=en").as_deref(),
            Some("https://en.wikipedia.org/wiki/K2")
        );
    }

    #[test]
    fn rejects_offsite_and_unresolvable() {
        assert_eq!(normalize("https://example.com/wiki/K2"), None);
        assert_eq!(normalize("mailto:editor@example.com"), None);
        assert_eq!(normalize("K2"), None);
    }

    #[test]
    fn expands_mountain_lists() {
        assert!(is_expandable_list(
            "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Colorado"
        ));
        assert!(is_expandable_list(
            "https://en.wikipedia.org/wiki/Lists_of_mountains_by_region"
        ));
        assert!(is_expandable_list(
            "https://en.wikipedia.org/wiki/Category:Mountains_of_France"
        ));
    }

    #[test]
    fn deny_namespaces_beat_list_keywords() {
        assert!(!is_expandable_list(
            "https://en.wikipedia.org/wiki/Talk:List_of_mountain_peaks_of_Colorado"
        ));
        assert!(!is_expandable_list(
            "https://en.wikipedia.org/wiki/Special:List_of_mountains"
        ));
        assert!(!is_expandable_list(
            "https://en.wikipedia.org/wiki/Template:List_of_mountains"
        ));
    }

    #[test]
    fn unrelated_pages_are_not_expandable() {
        assert!(!is_expandable_list("https://en.wikipedia.org/wiki/Geology"));
        assert!(!is_expandable_list("https://example.com/List_of_mountains"));
    }

    #[test]
    fn accepts_plain_peak_titles() {
        assert!(is_candidate_peak("https://en.wikipedia.org/wiki/K2"));
        assert!(is_candidate_peak("https://en.wikipedia.org/wiki/Mount_Rainier"));
        assert!(is_candidate_peak("https://en.wikipedia.org/wiki/Aconcagua"));
    }

    #[test]
    fn rejects_lists_and_namespaces() {
        assert!(!is_candidate_peak(
            "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Colorado"
        ));
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/Category:Volcano"));
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/File:K2.jpg"));
    }

    #[test]
    fn rejects_plural_terrain_words() {
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/Rocky_Mountain_Ranges"));
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/Black_Hills"));
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/Twin_Peaks"));
    }

    #[test]
    fn rejects_trailing_s_titles() {
        assert!(!is_candidate_peak("https://en.wikipedia.org/wiki/Andes"));
    }
}
