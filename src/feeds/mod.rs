//! Feed retrieval.
//!
//! The collector never talks to the network directly; it goes through a
//! [`FeedFetcher`], which turns a feed URL into [`RawEntry`] values.
//!
//! | Module | Role |
//! |--------|------|
//! | [`http`] | `reqwest` + `feed-rs` fetcher used in production |
//! | [`topics`] | Builds topic-search feed URLs |

pub mod http;
pub mod topics;

use crate::error::SourceFetchError;
use crate::models::RawEntry;

/// Retrieves and parses one feed document.
pub trait FeedFetcher {
    /// Fetch `url` and return its entries in document order.
    async fn fetch(&self, url: &str) -> Result<Vec<RawEntry>, SourceFetchError>;
}
