//! Data models shared by every pipeline stage.
//!
//! - [`RawEntry`]: one feed entry as the transport layer hands it over
//! - [`FeedSource`]: one configured feed, immutable for the whole run
//! - [`Article`]: the normalized record produced by collection and annotated
//!   by the keyword filter
//! - [`ArticleGroups`]: index-based partitions of the final article set

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category key used when an article carries no category.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A feed entry before normalization.
///
/// Every field is optional because feeds in the wild omit all of them at some
/// point. Timestamps are kept as text so the normalizer owns the parsing
/// policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
}

/// A configured feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    pub tags: Vec<String>,
    pub category: String,
    pub enabled: bool,
}

/// A normalized article.
///
/// `url` is the identity of an article within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    /// Publication time in UTC.
    pub published: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: String,
    /// Topic that surfaced this article, for topic-search results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_topic: Option<String>,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    /// Set when the feed gave no usable date and collection time was used.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub published_is_estimated: bool,
}

impl Article {
    /// Category key for grouping, with blanks mapped to [`UNKNOWN_CATEGORY`].
    pub fn category_key(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            category
        }
    }
}

/// Three independent partitions of one article slice.
///
/// Values are indices into the slice that was grouped, so each article keeps a
/// single owner. Keys keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleGroups {
    pub by_source: IndexMap<String, Vec<usize>>,
    pub by_category: IndexMap<String, Vec<usize>>,
    pub by_keyword: IndexMap<String, Vec<usize>>,
}

/// Article count per key, in the key order of the group.
pub fn counts(group: &IndexMap<String, Vec<usize>>) -> IndexMap<String, usize> {
    group
        .iter()
        .map(|(key, indices)| (key.clone(), indices.len()))
        .collect()
}

impl ArticleGroups {
    /// Resolve the members of one group back to articles.
    pub fn resolve<'a>(
        articles: &'a [Article],
        indices: &'a [usize],
    ) -> impl Iterator<Item = &'a Article> + 'a {
        indices.iter().filter_map(move |&i| articles.get(i))
    }
}
