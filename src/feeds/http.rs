//! HTTP feed fetcher.
//!
//! Downloads a feed with `reqwest` and parses it with `feed-rs`, which
//! handles RSS 0.9x/1.0/2.0, Atom, and JSON Feed. Dates that `feed-rs` cannot
//! read come through as missing and are handled by the normalizer.

use super::FeedFetcher;
use crate::error::SourceFetchError;
use crate::models::RawEntry;
use feed_rs::model::{Feed, Link};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("feed_digest/", env!("CARGO_PKG_VERSION"));

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, SourceFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedFetcher for HttpFeedFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SourceFetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "Downloaded feed");
        parse_feed(&bytes)
    }
}

/// Parse a feed document into raw entries.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawEntry>, SourceFetchError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| SourceFetchError::Parse(e.to_string()))?;
    Ok(entries_from_feed(feed))
}

/// The entry's alternate link (no `rel` or `rel="alternate"`), else its
/// first link.
fn article_link(links: Vec<Link>) -> Option<String> {
    let alternate = links
        .iter()
        .position(|l| l.rel.as_deref().is_none_or(|rel| rel == "alternate"))
        .unwrap_or(0);
    links.into_iter().nth(alternate).map(|l| l.href)
}

fn entries_from_feed(feed: Feed) -> Vec<RawEntry> {
    feed.entries
        .into_iter()
        .map(|entry| RawEntry {
            title: entry.title.map(|t| t.content),
            link: article_link(entry.links),
            summary: entry.summary.map(|t| t.content),
            description: entry.content.and_then(|c| c.body),
            published: entry.published.map(|d| d.to_rfc3339()),
            updated: entry.updated.map(|d| d.to_rfc3339()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::parse_timestamp;
    use chrono::{TimeZone, Utc};

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>TechDaily</title>
    <link>https://techdaily.example</link>
    <description>Tech news</description>
    <item>
      <title>New AI chip</title>
      <link>https://techdaily.example/1</link>
      <description>A faster chip</description>
      <pubDate>Tue, 06 May 2025 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated story</title>
      <link>https://techdaily.example/2</link>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example:feed</id>
  <updated>2025-05-06T09:00:00Z</updated>
  <entry>
    <title>Regulation update</title>
    <id>urn:example:1</id>
    <link href="https://atom.example/1"/>
    <updated>2025-05-06T09:00:00Z</updated>
    <summary>Summary text</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_entries() {
        let entries = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.title.as_deref(), Some("New AI chip"));
        assert_eq!(first.link.as_deref(), Some("https://techdaily.example/1"));
        assert_eq!(first.summary.as_deref(), Some("A faster chip"));
        assert_eq!(
            first.published.as_deref().and_then(parse_timestamp),
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 10, 0, 0).unwrap())
        );

        assert!(entries[1].published.is_none());
    }

    #[test]
    fn test_parse_atom_entries() {
        let entries = parse_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].link.as_deref(), Some("https://atom.example/1"));
        assert_eq!(
            entries[0].updated.as_deref().and_then(parse_timestamp),
            Some(Utc.with_ymd_and_hms(2025, 5, 6, 9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_atom_prefers_alternate_link() {
        let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Blog</title>
  <id>urn:example:blog</id>
  <updated>2025-05-06T09:00:00Z</updated>
  <entry>
    <title>Post</title>
    <id>urn:example:post:1</id>
    <updated>2025-05-06T09:00:00Z</updated>
    <link rel="replies" type="application/atom+xml" href="https://blog.example/feeds/1/comments"/>
    <link rel="self" type="application/atom+xml" href="https://blog.example/feeds/posts/1"/>
    <link rel="alternate" type="text/html" href="https://blog.example/2025/05/post.html"/>
  </entry>
</feed>"#;
        let entries = parse_feed(atom.as_bytes()).unwrap();
        assert_eq!(
            entries[0].link.as_deref(),
            Some("https://blog.example/2025/05/post.html")
        );
    }

    #[test]
    fn test_article_link_falls_back_to_first() {
        let link = |href: &str, rel: &str| Link {
            href: href.to_string(),
            rel: Some(rel.to_string()),
            media_type: None,
            href_lang: None,
            title: None,
            length: None,
        };
        let links = vec![link("https://a/comments", "replies"), link("https://a/self", "self")];
        assert_eq!(article_link(links).as_deref(), Some("https://a/comments"));
        assert_eq!(article_link(Vec::new()), None);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let err = parse_feed(b"<html><body>not a feed</body></html>").unwrap_err();
        assert!(matches!(err, SourceFetchError::Parse(_)));
    }
}
