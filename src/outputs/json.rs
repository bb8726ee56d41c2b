//! JSON documents consumed by external readers.
//!
//! # Raw data document
//!
//! ```text
//! { timestamp, total_articles, articles: [...],
//!   groups: { by_source: {k: n}, by_category: {k: n}, by_keyword: {k: n} } }
//! ```
//!
//! # Summary document
//!
//! ```text
//! { timestamp, total_articles, sources: {k: n}, top_keywords: [[k, n], ...],
//!   recent_headlines: [{title, source, url, published}, ...] }
//! ```
//!
//! Both are pretty-printed with two-space indentation, non-ASCII text is
//! written as-is, and object keys keep group order.

use super::summary::{TOP_N, most_recent, top_keywords};
use crate::models::{Article, ArticleGroups, counts};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GroupCounts {
    pub by_source: IndexMap<String, usize>,
    pub by_category: IndexMap<String, usize>,
    pub by_keyword: IndexMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct RawDataDocument<'a> {
    pub timestamp: &'a str,
    pub total_articles: usize,
    pub articles: &'a [Article],
    pub groups: GroupCounts,
}

#[derive(Debug, Serialize)]
pub struct Headline<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub url: &'a str,
    pub published: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub timestamp: &'a str,
    pub total_articles: usize,
    pub sources: IndexMap<String, usize>,
    pub top_keywords: Vec<(String, usize)>,
    pub recent_headlines: Vec<Headline<'a>>,
}

impl<'a> RawDataDocument<'a> {
    pub fn new(timestamp: &'a str, articles: &'a [Article], groups: &ArticleGroups) -> Self {
        Self {
            timestamp,
            total_articles: articles.len(),
            articles,
            groups: GroupCounts {
                by_source: counts(&groups.by_source),
                by_category: counts(&groups.by_category),
                by_keyword: counts(&groups.by_keyword),
            },
        }
    }
}

impl<'a> SummaryDocument<'a> {
    pub fn new(timestamp: &'a str, articles: &'a [Article], groups: &ArticleGroups) -> Self {
        Self {
            timestamp,
            total_articles: articles.len(),
            sources: counts(&groups.by_source),
            top_keywords: top_keywords(groups),
            recent_headlines: most_recent(articles, TOP_N)
                .into_iter()
                .map(|a| Headline {
                    title: &a.title,
                    source: &a.source,
                    url: &a.url,
                    published: a.published,
                })
                .collect(),
        }
    }
}
