//! Article collection across configured feeds.
//!
//! Sources are fetched one after another. Each source yields its own
//! `Result`, so an unreachable or broken feed only costs that feed's
//! articles. Once every source (and the optional topic search) has been
//! gathered, the pool is deduplicated by URL.
//!
//! # Deduplication tie-break
//!
//! When several entries share a URL, the one gathered *last* is kept, at the
//! position where the URL was first seen. Collection order is configuration
//! order, so the result is deterministic for a given registry.

use crate::config::TopicSearch;
use crate::error::SourceFetchError;
use crate::feeds::FeedFetcher;
use crate::feeds::topics::topic_source;
use crate::models::{Article, FeedSource};
use crate::normalizer::normalize;
use crate::utils::truncate_for_log;
use chrono::{DateTime, Duration, Utc};
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

/// Collects articles through a [`FeedFetcher`] relative to a fixed clock.
///
/// `now` is captured once per run so every source shares the same cutoff and
/// the same fallback timestamp.
#[derive(Debug)]
pub struct Collector<'a, F> {
    fetcher: &'a F,
    now: DateTime<Utc>,
}

impl<'a, F: FeedFetcher> Collector<'a, F> {
    /// Collector whose cutoff and fallback timestamp derive from `now`.
    pub fn at(fetcher: &'a F, now: DateTime<Utc>) -> Self {
        Self { fetcher, now }
    }

    /// Articles must be published strictly after this instant.
    ///
    /// A window reaching past the earliest representable time keeps everything.
    pub fn cutoff(&self, cutoff_hours: u32) -> DateTime<Utc> {
        Duration::try_hours(i64::from(cutoff_hours))
            .and_then(|window| self.now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Fetch and normalize a single source.
    ///
    /// Malformed entries are skipped. `max_entries` caps how many raw entries
    /// are considered, before the time window is applied.
    #[instrument(level = "debug", skip_all, fields(source = %source.name))]
    pub async fn collect_source(
        &self,
        source: &FeedSource,
        cutoff: DateTime<Utc>,
        max_entries: Option<usize>,
    ) -> Result<Vec<Article>, SourceFetchError> {
        let entries = self.fetcher.fetch(&source.url).await?;
        let limit = max_entries.unwrap_or(entries.len());

        let mut articles = Vec::new();
        let mut skipped = 0usize;
        for entry in entries.iter().take(limit) {
            match normalize(entry, source, cutoff, self.now) {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => {}
                Err(e) => {
                    skipped += 1;
                    debug!(error = %e, "Skipping malformed entry");
                }
            }
        }
        if skipped > 0 {
            warn!(source = %source.name, skipped, "Skipped malformed entries");
        }
        Ok(articles)
    }

    /// Gather every enabled source without deduplicating.
    async fn gather_sources(&self, sources: &[FeedSource], cutoff: DateTime<Utc>) -> Vec<Article> {
        let results: Vec<(&FeedSource, Result<Vec<Article>, SourceFetchError>)> =
            stream::iter(sources.iter().filter(|s| s.enabled))
                .then(|source| async move { (source, self.collect_source(source, cutoff, None).await) })
                .collect()
                .await;

        let mut pool = Vec::new();
        let mut failed = 0usize;
        for (source, result) in results {
            match result {
                Ok(articles) => {
                    info!(source = %source.name, count = articles.len(), "Collected source");
                    pool.extend(articles);
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        source = %source.name,
                        error = %truncate_for_log(&e.to_string(), 120),
                        "Source fetch failed; treating as empty"
                    );
                }
            }
        }
        if failed > 0 {
            warn!(failed, "Some sources could not be collected");
        }
        pool
    }

    /// Gather topic-search results without deduplicating.
    async fn gather_topics(&self, search: &TopicSearch, cutoff: DateTime<Utc>) -> Vec<Article> {
        if !search.enabled || search.topics.is_empty() {
            return Vec::new();
        }

        let mut pool = Vec::new();
        for topic in &search.topics {
            let source = topic_source(&search.url_template, topic);
            match self
                .collect_source(&source, cutoff, Some(search.max_per_topic))
                .await
            {
                Ok(articles) => {
                    info!(%topic, count = articles.len(), "Collected topic search");
                    pool.extend(articles.into_iter().map(|mut article| {
                        article.search_topic = Some(topic.clone());
                        article
                    }));
                }
                Err(e) => {
                    warn!(
                        %topic,
                        error = %truncate_for_log(&e.to_string(), 120),
                        "Topic search failed"
                    );
                }
            }
        }
        info!(count = pool.len(), "Topic search complete");
        pool
    }

    /// Collect from `sources` and deduplicate by URL.
    #[instrument(level = "info", skip_all, fields(sources = sources.len(), cutoff_hours = cutoff_hours))]
    pub async fn collect(&self, sources: &[FeedSource], cutoff_hours: u32) -> Vec<Article> {
        let cutoff = self.cutoff(cutoff_hours);
        let pool = self.gather_sources(sources, cutoff).await;
        finish(pool)
    }

    /// Collect from `sources` and the topic search into one pool, then
    /// deduplicate by URL.
    #[instrument(level = "info", skip_all, fields(sources = sources.len(), cutoff_hours = cutoff_hours))]
    pub async fn collect_all(
        &self,
        sources: &[FeedSource],
        search: &TopicSearch,
        cutoff_hours: u32,
    ) -> Vec<Article> {
        let cutoff = self.cutoff(cutoff_hours);
        let mut pool = self.gather_sources(sources, cutoff).await;
        pool.extend(self.gather_topics(search, cutoff).await);
        finish(pool)
    }
}

fn finish(pool: Vec<Article>) -> Vec<Article> {
    let total = pool.len();
    let unique = dedup_by_url(pool);
    info!(total, unique = unique.len(), "Collection complete");
    unique
}

/// Keep one article per URL: the last one seen, at the first one's position.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut by_url: IndexMap<String, Article> = IndexMap::with_capacity(articles.len());
    for article in articles {
        by_url.insert(article.url.clone(), article);
    }
    by_url.into_values().collect()
}
