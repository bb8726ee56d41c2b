//! # feed_digest
//!
//! Polls a registry of RSS/Atom feeds, keeps the articles from the recent
//! time window, filters them by keyword, groups them by source, category,
//! and keyword, and writes digest files for a later manual or LLM-assisted
//! analysis step.
//!
//! ## Usage
//!
//! ```sh
//! feed_digest -f feeds.yaml -c criteria.yaml -r reports
//! ```
//!
//! ## Architecture
//!
//! The run is a strict pipeline:
//! 1. **Collection**: fetch every enabled feed (plus topic searches), normalize
//!    entries, apply the time window, deduplicate by URL
//! 2. **Filtering**: include/exclude keywords, annotate matches
//! 3. **Grouping**: by source, category, and matched keyword
//! 4. **Output**: raw data JSON, summary JSON, text digest, and `latest` copies

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod error;
mod feeds;
mod filter;
mod grouper;
mod models;
mod normalizer;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use error::RunError;
use feeds::http::HttpFeedFetcher;
use outputs::sink::FsReportSink;
use outputs::{LATEST_DIGEST, LATEST_RAW};
use pipeline::RunOptions;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration: fatal before any fetch ----
    let config = match config::load_feeds(&args.feeds) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load feed registry");
            return Err(e.into());
        }
    };
    if let Err(e) = config::load_criteria(&args.criteria) {
        error!(error = %e, "Failed to load criteria document");
        return Err(e.into());
    }

    if !args.dry_run {
        if let Err(e) = ensure_writable_dir(&args.reports_dir).await {
            error!(
                path = %args.reports_dir.display(),
                error = %e,
                "Reports directory is not writable (fix perms or choose a different path)"
            );
            return Err(e.into());
        }
    }

    let fetcher = HttpFeedFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let sink = FsReportSink::new(&args.reports_dir);
    let options = RunOptions {
        hours_back: args.hours_back,
        dry_run: args.dry_run,
    };

    let outcome = pipeline::run(&config, &fetcher, &sink, &options, Utc::now()).await;
    let elapsed = start_time.elapsed();

    match outcome {
        Ok(summary) => {
            info!(
                collected = summary.collected,
                kept = summary.kept,
                sources = summary.sources,
                files = summary.written.len(),
                timestamp = %summary.timestamp,
                ?elapsed,
                "Execution complete"
            );
            if !summary.written.is_empty() {
                info!(
                    digest = %sink.path_of(LATEST_DIGEST).display(),
                    data = %sink.path_of(LATEST_RAW).display(),
                    criteria = %args.criteria.display(),
                    "Next: skim the digest, then analyze the raw data against the criteria"
                );
            }
            Ok(())
        }
        Err(RunError::EmptyResult) => Ok(()),
        Err(e) => {
            error!(error = %e, ?elapsed, "Run failed");
            Err(e.into())
        }
    }
}
