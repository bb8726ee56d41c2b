//! Grouping of filtered articles by source, category, and matched keyword.

use crate::models::{Article, ArticleGroups};
use tracing::{debug, instrument};

/// Partition `articles` in a single pass.
///
/// Every article lands once in `by_source` and once in `by_category`, and once
/// per matched keyword in `by_keyword`. Groups hold indices into `articles`.
#[instrument(level = "info", skip_all, fields(articles = articles.len()))]
pub fn group(articles: &[Article]) -> ArticleGroups {
    let mut groups = ArticleGroups::default();
    for (i, article) in articles.iter().enumerate() {
        groups
            .by_source
            .entry(article.source.clone())
            .or_default()
            .push(i);
        groups
            .by_category
            .entry(article.category_key().to_string())
            .or_default()
            .push(i);
        for keyword in &article.matched_keywords {
            groups.by_keyword.entry(keyword.clone()).or_default().push(i);
        }
    }
    debug!(
        sources = groups.by_source.len(),
        categories = groups.by_category.len(),
        keywords = groups.by_keyword.len(),
        "Grouped articles"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::article;

    fn sample() -> Vec<Article> {
        let mut a = article("https://x/1", "TechDaily", "AI chip");
        a.matched_keywords = vec!["AI".into(), "chip".into()];
        let mut b = article("https://x/2", "WorldWire", "Election");
        b.category = String::new();
        let mut c = article("https://x/3", "TechDaily", "AI law");
        c.category = "ai_and_regulation".into();
        c.matched_keywords = vec!["AI".into()];
        vec![a, b, c]
    }

    #[test]
    fn test_group_by_source_and_category() {
        let articles = sample();
        let groups = group(&articles);

        assert_eq!(groups.by_source["TechDaily"], vec![0, 2]);
        assert_eq!(groups.by_source["WorldWire"], vec![1]);
        assert_eq!(groups.by_category["tech_news"], vec![0]);
        assert_eq!(groups.by_category["unknown"], vec![1]);
        assert_eq!(groups.by_category["ai_and_regulation"], vec![2]);
    }

    #[test]
    fn test_group_by_keyword_allows_repeats_and_absence() {
        let articles = sample();
        let groups = group(&articles);

        assert_eq!(groups.by_keyword["AI"], vec![0, 2]);
        assert_eq!(groups.by_keyword["chip"], vec![0]);
        assert!(groups.by_keyword.values().all(|v| !v.contains(&1)));
    }

    #[test]
    fn test_grouping_is_complete() {
        let articles = sample();
        let groups = group(&articles);
        let by_source: usize = groups.by_source.values().map(Vec::len).sum();
        let by_category: usize = groups.by_category.values().map(Vec::len).sum();
        assert_eq!(by_source, articles.len());
        assert_eq!(by_category, articles.len());
    }

    #[test]
    fn test_keys_keep_first_seen_order() {
        let articles = sample();
        let groups = group(&articles);
        let keys: Vec<_> = groups.by_source.keys().cloned().collect();
        assert_eq!(keys, vec!["TechDaily", "WorldWire"]);
    }

    #[test]
    fn test_empty_input() {
        let groups = group(&[]);
        assert_eq!(groups, ArticleGroups::default());
    }
}
