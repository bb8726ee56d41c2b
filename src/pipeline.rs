//! One end-to-end digest run: collect → filter → group → report.

use crate::collector::Collector;
use crate::config::FeedsConfig;
use crate::error::{ConfigError, RunError};
use crate::feeds::FeedFetcher;
use crate::filter::filter;
use crate::grouper::group;
use crate::outputs::ReportBundle;
use crate::outputs::sink::ReportSink;
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Replaces `filters.hours_back` when set.
    pub hours_back: Option<u32>,
    /// Build every artifact but write none.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub collected: usize,
    pub kept: usize,
    pub sources: usize,
    pub timestamp: String,
    /// Artifact names written, empty on a dry run.
    pub written: Vec<String>,
}

fn report_offset(config: &FeedsConfig) -> Result<FixedOffset, ConfigError> {
    FixedOffset::east_opt(config.report.utc_offset_hours * 3600).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "report.utc_offset_hours out of range: {}",
            config.report.utc_offset_hours
        ))
    })
}

/// Run the pipeline against `fetcher` and write through `sink`.
///
/// `now` is the collection time: it fixes the cutoff, the fallback
/// publication time, and the report timestamp.
#[instrument(level = "info", skip_all, fields(dry_run = options.dry_run))]
pub async fn run<F: FeedFetcher, S: ReportSink>(
    config: &FeedsConfig,
    fetcher: &F,
    sink: &S,
    options: &RunOptions,
    now: DateTime<Utc>,
) -> Result<RunSummary, RunError> {
    let offset = report_offset(config)?;
    let hours_back = options.hours_back.unwrap_or(config.filters.hours_back);
    if hours_back == 0 {
        return Err(ConfigError::Invalid("hours_back must be positive".into()).into());
    }

    let sources = config.enabled_sources();
    info!(sources = sources.len(), hours_back, "Collecting news");

    let collector = Collector::at(fetcher, now);
    let collected = if config.topic_search.enabled {
        collector
            .collect_all(&sources, &config.topic_search, hours_back)
            .await
    } else {
        collector.collect(&sources, hours_back).await
    };
    let collected_count = collected.len();

    let articles = filter(
        collected,
        &config.filters.keywords,
        &config.filters.exclude_keywords,
    );
    if articles.is_empty() {
        warn!(collected = collected_count, "No articles after filtering; nothing to write");
        return Err(RunError::EmptyResult);
    }

    let groups = group(&articles);
    let bundle = ReportBundle::build(&articles, &groups, now.with_timezone(&offset))?;

    let written = if options.dry_run {
        info!(timestamp = %bundle.timestamp, "Dry run; skipping report files");
        Vec::new()
    } else {
        bundle.publish(sink).await?
    };

    Ok(RunSummary {
        collected: collected_count,
        kept: articles.len(),
        sources: groups.by_source.len(),
        timestamp: bundle.timestamp,
        written,
    })
}
