#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rate-limited HTTP fetcher with an on-disk page cache.
//!
//! Every page body is memoized under the cache root keyed by the URL with
//! its scheme stripped, so repeated pipeline runs cost zero network calls
//! for already-seen URLs. A fetch that lands on an unexpected redirect
//! target stores a sentinel instead of a body; subsequent lookups treat
//! the URL as unavailable rather than re-requesting it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use deunicode::deunicode;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Marker stored in place of a page body when the fetch was redirected to
/// an unexpected target.
const REDIRECT_SENTINEL: &str = "redirect";

/// Characters left unescaped when building the percent-encoded redirect
/// equivalence form (alphanumerics plus `_ . - ~ /`).
const QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Errors that can occur while fetching or caching a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A cache read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk memoizing page fetcher.
///
/// Construct once and pass by reference to the crawler and extractor;
/// the cache root and throttle interval are explicit state, not ambient
/// globals.
#[derive(Debug, Clone)]
pub struct PageCache {
    /// Directory that page bodies are stored under.
    root: PathBuf,
    /// Delay inserted before every uncached network fetch.
    delay: Duration,
    client: reqwest::Client,
}

impl PageCache {
    /// Creates a page cache rooted at `root` with a 2 second fetch delay.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed (TLS backend
    /// initialization failure).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("peak-map/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("valid HTTP client");
        Self {
            root: root.into(),
            delay: Duration::from_secs(2),
            client,
        }
    }

    /// Overrides the delay inserted before uncached fetches.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the on-disk path a URL's body is cached at.
    ///
    /// The key is the URL with its scheme prefix stripped, used as a
    /// relative file path, plus an `.html` extension. Stable across runs
    /// so that a re-run hits the same files.
    #[must_use]
    pub fn cache_path(&self, url: &str) -> PathBuf {
        let key = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        self.root.join(format!("{key}.html"))
    }

    /// Returns the cached or freshly fetched body of `url`.
    ///
    /// `Ok(None)` means the page is unavailable at its expected location
    /// (a stored or newly detected off-target redirect); callers should
    /// skip the URL, not retry it.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the HTTP request or a cache file
    /// operation fails.
    pub async fn get(&self, url: &str) -> Result<Option<String>, FetchError> {
        let path = self.cache_path(url);
        if path.exists() {
            let body = std::fs::read_to_string(&path)?;
            if body == REDIRECT_SENTINEL {
                log::debug!("Cached redirect sentinel for {url}");
                return Ok(None);
            }
            return Ok(Some(body));
        }

        // Throttle only real network fetches.
        tokio::time::sleep(self.delay).await;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let response = self.client.get(url).send().await?;
        let final_url = response.url().as_str().to_owned();
        if final_url != url && !accepted_redirects(url).contains(&final_url) {
            log::warn!("Redirected from {url} to {final_url}; storing sentinel");
            std::fs::write(&path, REDIRECT_SENTINEL)?;
            return Ok(None);
        }

        let body = response.text().await?;
        std::fs::write(&path, &body)?;
        log::debug!("Fetched and cached {url}");
        Ok(Some(body))
    }
}

/// Redirect targets considered equivalent to the requested URL.
///
/// Wikipedia redirects accented titles to their transliterated form and
/// percent-encodes non-ASCII path segments; neither means the article
/// moved.
fn accepted_redirects(url: &str) -> Vec<String> {
    let quoted = utf8_percent_encode(url, QUOTE_SET)
        .to_string()
        .replace("https%3A//", "https://");
    vec![deunicode(url), quoted]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_path_strips_scheme() {
        let cache = PageCache::new("/tmp/cache");
        assert_eq!(
            cache.cache_path("https://en.wikipedia.org/wiki/Mount_Foo"),
            PathBuf::from("/tmp/cache/en.wikipedia.org/wiki/Mount_Foo.html")
        );
    }

    #[test]
    fn cache_path_is_stable_across_instances() {
        let a = PageCache::new("cache");
        let b = PageCache::new("cache");
        let url = "https://en.wikipedia.org/wiki/K2";
        assert_eq!(a.cache_path(url), b.cache_path(url));
    }

    #[test]
    fn accepts_transliterated_redirect() {
        let url = "https://en.wikipedia.org/wiki/Pic_du_Midi_d'Ossau";
        assert!(accepted_redirects(url).contains(&deunicode(url)));
    }

    #[test]
    fn accepts_percent_encoded_redirect() {
        let redirects = accepted_redirects("https://en.wikipedia.org/wiki/Jbel Toubkal");
        assert!(redirects.contains(&"https://en.wikipedia.org/wiki/Jbel%20Toubkal".to_owned()));
    }

    #[tokio::test]
    async fn cached_body_is_returned_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());
        let url = "https://en.wikipedia.org/wiki/Mount_Bar";
        let path = cache.cache_path(url);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "<html>peak</html>").unwrap();

        let body = cache.get(url).await.unwrap();
        assert_eq!(body.as_deref(), Some("<html>peak</html>"));
    }

    #[tokio::test]
    async fn redirect_sentinel_reads_as_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path());
        let url = "https://en.wikipedia.org/wiki/Moved_Peak";
        let path = cache.cache_path(url);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, REDIRECT_SENTINEL).unwrap();

        assert!(cache.get(url).await.unwrap().is_none());
    }
}
