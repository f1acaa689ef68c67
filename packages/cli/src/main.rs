#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command line entry point for the peak map pipeline.
//!
//! `crawl` walks the list-page graph and prints discovered peak URLs,
//! `extract` dumps one peak record, and `run` drives the full
//! crawl → extract → save pipeline. A single bad record never aborts a
//! run: failures are logged with the peak's name and URL and the loop
//! moves on.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use peak_map_crawl::Crawler;
use peak_map_extract::Peak;
use peak_map_fetch::PageCache;

/// Default root list page the traversal is seeded from.
const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Lists_of_mountains_by_region";

#[derive(Parser)]
#[command(name = "peak-map", about = "Mountain peak crawler and GeoJSON generator")]
struct Cli {
    /// Directory page bodies are cached under.
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Delay before each uncached fetch, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the list-page graph and print discovered peak URLs
    Crawl {
        /// Root list page to start from
        #[arg(long, default_value = DEFAULT_SEED)]
        seed: String,
        /// Stop after this many peaks
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Extract a single peak article and print the record
    Extract {
        /// Peak article URL
        #[arg(long)]
        url: String,
    },
    /// Full pipeline: crawl, extract, and save feature files
    Run {
        /// Root list page to start from
        #[arg(long, default_value = DEFAULT_SEED)]
        seed: String,
        /// Directory the feature tree is written under
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,
        /// Stop after this many peaks
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let cache = PageCache::new(&cli.cache_dir).with_delay(Duration::from_millis(cli.delay_ms));

    match cli.command {
        Commands::Crawl { seed, limit } => {
            let mut crawler = Crawler::new(&cache, [seed]);
            let mut count = 0usize;
            while let Some(url) = crawler.next_peak().await? {
                println!("{url}");
                count += 1;
                if limit.is_some_and(|max| count >= max) {
                    break;
                }
            }
            println!("{count} peaks discovered");
        }
        Commands::Extract { url } => {
            let mut peak = Peak::from_url(&url);
            peak.extract(&cache).await?;
            println!("{}", serde_json::to_string_pretty(&peak.to_json())?);
        }
        Commands::Run { seed, out_dir, limit } => {
            let counts = run_pipeline(&cache, &seed, &out_dir, limit).await?;
            counts.print();
        }
    }

    Ok(())
}

/// Per-run outcome counters.
struct RunCounts {
    saved: usize,
    skipped: usize,
    failed: usize,
}

impl RunCounts {
    fn print(&self) {
        println!(
            "Saved {} peaks ({} skipped, {} failed).",
            self.saved, self.skipped, self.failed
        );
    }
}

/// Drives the full pipeline: every discovered peak is extracted and
/// saved; extraction rejects and save errors are logged and skipped.
async fn run_pipeline(
    cache: &PageCache,
    seed: &str,
    out_dir: &std::path::Path,
    limit: Option<usize>,
) -> Result<RunCounts, peak_map_crawl::CrawlError> {
    let mut crawler = Crawler::new(cache, [seed.to_owned()]);
    let mut counts = RunCounts {
        saved: 0,
        skipped: 0,
        failed: 0,
    };

    while let Some(url) = crawler.next_peak().await? {
        let mut peak = Peak::from_url(&url);
        if let Err(e) = peak.extract(cache).await {
            log::warn!("Failed to extract {} ({url}): {e}", peak.name);
            counts.skipped += 1;
            continue;
        }

        match peak_map_generate::save(&peak, out_dir) {
            Ok(path) => {
                log::info!("{}\tsaved {}", counts.saved + 1, path.display());
                counts.saved += 1;
            }
            Err(e) => {
                log::warn!("Failed to save {} ({url}): {e}", peak.name);
                counts.failed += 1;
            }
        }

        let total = counts.saved + counts.skipped + counts.failed;
        if limit.is_some_and(|max| total >= max) {
            break;
        }
    }

    Ok(counts)
}
