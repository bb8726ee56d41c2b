//! Rankings derived from grouped articles.
//!
//! All rankings sort by descending count with a stable sort, so equal counts
//! keep the group's first-seen key order.

use crate::models::{Article, ArticleGroups};
use indexmap::IndexMap;
use itertools::Itertools;
use std::cmp::Reverse;

/// Length of the keyword and headline lists.
pub const TOP_N: usize = 10;

/// `(key, count)` pairs by descending count.
pub fn rank(group: &IndexMap<String, Vec<usize>>) -> Vec<(String, usize)> {
    group
        .iter()
        .map(|(key, members)| (key.clone(), members.len()))
        .sorted_by_key(|(_, count)| Reverse(*count))
        .collect()
}

/// Every source ranked by article count.
pub fn source_ranking(groups: &ArticleGroups) -> Vec<(String, usize)> {
    rank(&groups.by_source)
}

/// The [`TOP_N`] keywords by article count.
///
/// Falls back to the top sources when no keyword matched anything (keyword
/// filtering disabled).
pub fn top_keywords(groups: &ArticleGroups) -> Vec<(String, usize)> {
    let group = if groups.by_keyword.is_empty() {
        &groups.by_source
    } else {
        &groups.by_keyword
    };
    rank(group).into_iter().take(TOP_N).collect()
}

/// The `n` most recently published articles, newest first.
pub fn most_recent(articles: &[Article], n: usize) -> Vec<&Article> {
    articles
        .iter()
        .sorted_by_key(|a| Reverse(a.published))
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::group;
    use crate::models::fixtures::{article, at};

    fn tagged(url: &str, source: &str, keywords: &[&str]) -> Article {
        let mut a = article(url, source, "title");
        a.matched_keywords = keywords.iter().map(|s| s.to_string()).collect();
        a
    }

    #[test]
    fn test_source_ranking_descending_and_stable() {
        let articles = vec![
            tagged("https://x/1", "A", &[]),
            tagged("https://x/2", "B", &[]),
            tagged("https://x/3", "B", &[]),
            tagged("https://x/4", "C", &[]),
        ];
        let ranking = source_ranking(&group(&articles));
        assert_eq!(
            ranking,
            vec![("B".to_string(), 2), ("A".to_string(), 1), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_top_keywords_limited_to_ten() {
        let articles: Vec<Article> = (0..12)
            .map(|i| {
                let kw = format!("k{i}");
                tagged(&format!("https://x/{i}"), "A", &[kw.as_str(), "common"])
            })
            .collect();
        let top = top_keywords(&group(&articles));
        assert_eq!(top.len(), TOP_N);
        assert_eq!(top[0], ("common".to_string(), 12));
        assert_eq!(top[1], ("k0".to_string(), 1));
    }

    #[test]
    fn test_top_keywords_fall_back_to_sources() {
        let articles = vec![
            tagged("https://x/1", "A", &[]),
            tagged("https://x/2", "B", &[]),
            tagged("https://x/3", "B", &[]),
        ];
        let top = top_keywords(&group(&articles));
        assert_eq!(top, vec![("B".to_string(), 2), ("A".to_string(), 1)]);
    }

    #[test]
    fn test_most_recent_newest_first() {
        let articles: Vec<Article> = (0..12)
            .map(|h| {
                let mut a = article(&format!("https://x/{h}"), "A", "t");
                a.published = at(h);
                a
            })
            .collect();
        let recent = most_recent(&articles, TOP_N);
        assert_eq!(recent.len(), TOP_N);
        assert_eq!(recent[0].published, at(11));
        assert_eq!(recent[9].published, at(2));
    }
}
