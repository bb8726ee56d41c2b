//! Feed entry normalization.
//!
//! Turns a [`RawEntry`] into an [`Article`] and applies the time window.
//!
//! # Timestamp policy
//!
//! 1. `published`, if present and parseable
//! 2. `updated`, if present and parseable
//! 3. the collection time, with [`Article::published_is_estimated`] set
//!
//! Entries without a usable date are kept as fresh so they surface for review
//! instead of disappearing.

use crate::error::MalformedEntry;
use crate::models::{Article, FeedSource, RawEntry};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a feed timestamp into UTC.
///
/// Accepts RFC 3339, RFC 2822, and a few naive ISO-like layouts which are
/// read as UTC. Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Effective publication time of an entry and whether it was estimated.
pub fn effective_published(entry: &RawEntry, now: DateTime<Utc>) -> (DateTime<Utc>, bool) {
    entry
        .published
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| entry.updated.as_deref().and_then(parse_timestamp))
        .map(|dt| (dt, false))
        .unwrap_or((now, true))
}

fn required(field: Option<&str>, missing: MalformedEntry) -> Result<String, MalformedEntry> {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(missing),
    }
}

/// Normalize one entry for `source`.
///
/// Returns `Ok(None)` when the entry is not strictly newer than `cutoff`.
/// The article carries the source's tags and category; keywords are left
/// empty for the filter to fill in.
pub fn normalize(
    entry: &RawEntry,
    source: &FeedSource,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Option<Article>, MalformedEntry> {
    let title = required(entry.title.as_deref(), MalformedEntry::MissingTitle)?;
    let url = required(entry.link.as_deref(), MalformedEntry::MissingLink)?;

    let (published, estimated) = effective_published(entry, now);
    if published <= cutoff {
        debug!(%url, %published, %cutoff, "Entry older than cutoff");
        return Ok(None);
    }
    if estimated {
        debug!(%url, "No usable date; using collection time");
    }

    let description = entry
        .summary
        .as_deref()
        .or(entry.description.as_deref())
        .unwrap_or_default()
        .to_string();

    Ok(Some(Article {
        title,
        url,
        source: source.name.clone(),
        published,
        description,
        tags: source.tags.clone(),
        category: source.category.clone(),
        search_topic: None,
        matched_keywords: Vec::new(),
        published_is_estimated: estimated,
    }))
}
