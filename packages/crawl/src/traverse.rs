//! Breadth-first traversal of mountain list pages.
//!
//! An explicit worklist walk: list pages come off a queue, their outbound
//! links either extend the queue (expandable lists) or become peak
//! candidates. A visited set guarantees no list page is processed twice;
//! a discovered set guarantees no candidate is yielded twice even when
//! several list pages link to it. A failed fetch drops that branch with
//! no retry.

use std::collections::{HashSet, VecDeque};
use std::sync::LazyLock;

use peak_map_extract::has_peak_infobox;
use peak_map_fetch::PageCache;
use scraper::{Html, Selector};

use crate::CrawlError;
use crate::link;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Pull-based peak URL discovery over a frontier of list pages.
pub struct Crawler<'a> {
    cache: &'a PageCache,
    /// Not-yet-visited list pages, in breadth-first order.
    frontier: VecDeque<String>,
    /// List pages already processed.
    visited: HashSet<String>,
    /// Candidate URLs ever enqueued, confirmed or not.
    discovered: HashSet<String>,
    /// Candidates from visited pages awaiting confirmation.
    pending: VecDeque<String>,
}

impl<'a> Crawler<'a> {
    /// Creates a crawler seeded with one or more root list pages.
    pub fn new(cache: &'a PageCache, seeds: impl IntoIterator<Item = String>) -> Self {
        Self {
            cache,
            frontier: seeds.into_iter().collect(),
            visited: HashSet::new(),
            discovered: HashSet::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next confirmed peak URL, or `None` when the link
    /// graph is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError`] if the fetch gateway fails outright; an
    /// unavailable single page is not an error, its branch is dropped.
    pub async fn next_peak(&mut self) -> Result<Option<String>, CrawlError> {
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                if self.confirm_is_peak(&candidate).await? {
                    return Ok(Some(candidate));
                }
                log::debug!("Candidate rejected by infobox check: {candidate}");
            }

            let Some(url) = self.frontier.pop_front() else {
                return Ok(None);
            };
            if !self.visited.insert(url.clone()) {
                continue;
            }

            let Some(body) = self.cache.get(&url).await? else {
                log::warn!("List page unavailable, dropping branch: {url}");
                continue;
            };

            for linked in scan_links(&body) {
                if link::is_expandable_list(&linked) {
                    self.frontier.push_back(linked);
                } else if link::is_candidate_peak(&linked) && self.discovered.insert(linked.clone())
                {
                    self.pending.push_back(linked);
                }
            }

            log::info!(
                "visited {} frontier {} pending {}",
                self.visited.len(),
                self.frontier.len(),
                self.pending.len()
            );
        }
    }

    /// The authoritative peak check: fetch the candidate page and require
    /// the mandatory infobox labels.
    async fn confirm_is_peak(&self, url: &str) -> Result<bool, CrawlError> {
        match self.cache.get(url).await? {
            Some(body) => Ok(has_peak_infobox(&body)),
            None => Ok(false),
        }
    }
}

/// Normalized outbound links of one page body.
fn scan_links(body: &str) -> Vec<String> {
    let html = Html::parse_document(body);
    html.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(link::normalize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEAK_INFOBOX: &str = r#"<table class="infobox">
        <tr><th class="infobox-label">Elevation</th><td class="infobox-data">4,392&#160;m</td></tr>
        <tr><th class="infobox-label">Coordinates</th>
            <td class="infobox-data"><span class="geo-dec">46.8523°N 121.7603°W</span></td></tr>
        <tr><th class="infobox-label">Parent range</th>
            <td class="infobox-data"><a href="/wiki/Cascade_Range">Cascade Range</a></td></tr>
    </table>"#;

    fn seed(cache: &PageCache, url: &str, body: &str) {
        let path = cache.cache_path(url);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    async fn collect_peaks(cache: &PageCache, seed_url: &str) -> Vec<String> {
        let mut crawler = Crawler::new(cache, [seed_url.to_owned()]);
        let mut peaks = Vec::new();
        while let Some(url) = crawler.next_peak().await.unwrap() {
            peaks.push(url);
        }
        peaks
    }

    #[tokio::test]
    async fn walks_lists_and_yields_confirmed_peaks() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let list_a = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Washington";
        let list_b = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Oregon";
        seed(
            &cache,
            list_a,
            r#"<body>
                <a href="/wiki/List_of_mountain_peaks_of_Oregon">more</a>
                <a href="/wiki/Mount_Rainier">Mount Rainier</a>
                <a href="/wiki/Talk:List_of_mountain_peaks_of_Oregon">talk</a>
                <a href="https://example.com/wiki/Elsewhere">offsite</a>
            </body>"#,
        );
        seed(
            &cache,
            list_b,
            r#"<body>
                <a href="/wiki/Mount_Hood">Mount Hood</a>
                <a href="/wiki/List_of_mountain_peaks_of_Washington">cycle</a>
            </body>"#,
        );
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Mount_Rainier",
            PEAK_INFOBOX,
        );
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Mount_Hood",
            PEAK_INFOBOX,
        );

        let peaks = collect_peaks(&cache, list_a).await;
        assert_eq!(
            peaks,
            vec![
                "https://en.wikipedia.org/wiki/Mount_Rainier".to_owned(),
                "https://en.wikipedia.org/wiki/Mount_Hood".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn never_yields_the_same_peak_twice() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let list_a = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_A";
        let list_b = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_B";
        let shared = r#"<a href="/wiki/Mount_Shared">x</a>"#;
        seed(
            &cache,
            list_a,
            &format!(r#"<a href="/wiki/List_of_mountain_peaks_of_B">b</a>{shared}"#),
        );
        seed(&cache, list_b, shared);
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Mount_Shared",
            PEAK_INFOBOX,
        );

        let peaks = collect_peaks(&cache, list_a).await;
        assert_eq!(peaks, vec!["https://en.wikipedia.org/wiki/Mount_Shared".to_owned()]);
    }

    #[tokio::test]
    async fn candidate_without_infobox_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let list = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_X";
        seed(&cache, list, r#"<a href="/wiki/Mount_Hollow">x</a>"#);
        seed(
            &cache,
            "https://en.wikipedia.org/wiki/Mount_Hollow",
            "<p>An article with no infobox at all.</p>",
        );

        assert!(collect_peaks(&cache, list).await.is_empty());
    }

    #[tokio::test]
    async fn unavailable_branch_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());

        let list = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Y";
        let dead = "https://en.wikipedia.org/wiki/List_of_mountain_peaks_of_Z";
        seed(
            &cache,
            list,
            r#"<a href="/wiki/List_of_mountain_peaks_of_Z">z</a>"#,
        );
        seed(&cache, dead, "redirect");

        assert!(collect_peaks(&cache, list).await.is_empty());
    }
}
