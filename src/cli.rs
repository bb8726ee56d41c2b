//! Command-line interface definitions for feed_digest.
//!
//! Every option has a default, so a bare `feed_digest` in a directory holding
//! `feeds.yaml` and `criteria.yaml` performs a normal run.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./feeds.yaml, ./criteria.yaml, reports written to ./reports
/// feed_digest
///
/// # Last 6 hours only, without writing anything
/// feed_digest --hours-back 6 --dry-run
///
/// # Explicit paths
/// feed_digest -f config/feeds.yaml -c config/criteria.yaml -r /var/lib/digest
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Feed registry (sources, filters, topic search)
    #[arg(short, long, env = "FEED_DIGEST_FEEDS", default_value = "feeds.yaml")]
    pub feeds: PathBuf,

    /// Analysis criteria document, validated and left for the analysis step
    #[arg(short, long, env = "FEED_DIGEST_CRITERIA", default_value = "criteria.yaml")]
    pub criteria: PathBuf,

    /// Directory that receives the report files
    #[arg(short, long, env = "FEED_DIGEST_REPORTS_DIR", default_value = "reports")]
    pub reports_dir: PathBuf,

    /// Override `filters.hours_back` from the feed registry
    #[arg(long)]
    pub hours_back: Option<u32>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Collect, filter, and group, but do not write report files
    #[arg(long)]
    pub dry_run: bool,
}
