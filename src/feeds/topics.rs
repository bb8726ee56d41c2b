//! Topic-search feed URLs.
//!
//! A topic search is a regular feed whose URL embeds the topic as a query
//! string, e.g. Google News `rss/search?q=...`.

use crate::models::FeedSource;

pub const TOPIC_SOURCE_NAME: &str = "Google News";
pub const TOPIC_CATEGORY: &str = "google_news";

/// Substitute the percent-encoded `topic` into `template`'s `{query}`.
pub fn topic_url(template: &str, topic: &str) -> String {
    template.replace("{query}", &urlencoding::encode(topic.trim()))
}

/// The pseudo-source that topic-search articles are attributed to.
pub fn topic_source(template: &str, topic: &str) -> FeedSource {
    FeedSource {
        name: TOPIC_SOURCE_NAME.to_string(),
        url: topic_url(template, topic),
        tags: vec![TOPIC_CATEGORY.to_string()],
        category: TOPIC_CATEGORY.to_string(),
        enabled: true,
    }
}
