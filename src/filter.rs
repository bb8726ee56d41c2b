//! Keyword filtering.
//!
//! Matching is a case-insensitive substring test against
//! `"{title} {description}"`. Exclude terms always win over include terms.
//! With no include terms, filtering is disabled and only excludes apply.

use crate::models::Article;
use tracing::{info, instrument};

/// Include/exclude keyword lists, lowercased once up front.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    /// `(configured, lowercased)` pairs in configured order.
    include: Vec<(String, String)>,
    exclude: Vec<String>,
}

fn prepare(terms: &[String]) -> impl Iterator<Item = &String> {
    terms.iter().filter(|t| !t.trim().is_empty())
}

impl KeywordFilter {
    /// Build a filter. Blank terms are ignored.
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: prepare(include)
                .map(|t| (t.clone(), t.to_lowercase()))
                .collect(),
            exclude: prepare(exclude).map(|t| t.to_lowercase()).collect(),
        }
    }

    /// `false` when there are no include terms.
    pub fn is_enabled(&self) -> bool {
        !self.include.is_empty()
    }

    fn haystack(article: &Article) -> String {
        format!("{} {}", article.title, article.description).to_lowercase()
    }

    fn is_excluded(&self, text: &str) -> bool {
        self.exclude.iter().any(|term| text.contains(term.as_str()))
    }

    /// Every include term found in `text`, in configured order.
    fn matches(&self, text: &str) -> Vec<String> {
        self.include
            .iter()
            .filter(|(_, lower)| text.contains(lower.as_str()))
            .map(|(term, _)| term.clone())
            .collect()
    }

    /// Decide on one article, returning it annotated if it passes.
    pub fn apply(&self, mut article: Article) -> Option<Article> {
        let text = Self::haystack(&article);
        if self.is_excluded(&text) {
            return None;
        }
        if !self.is_enabled() {
            article.matched_keywords = Vec::new();
            return Some(article);
        }
        let matched = self.matches(&text);
        if matched.is_empty() {
            return None;
        }
        article.matched_keywords = matched;
        Some(article)
    }

    /// Filter a batch, logging how many survived.
    #[instrument(level = "info", skip_all, fields(enabled = self.is_enabled()))]
    pub fn filter(&self, articles: Vec<Article>) -> Vec<Article> {
        let total = articles.len();
        let kept: Vec<Article> = articles.into_iter().filter_map(|a| self.apply(a)).collect();
        if self.is_enabled() {
            info!(kept = kept.len(), total, "Keyword filter applied");
        } else {
            info!(kept = kept.len(), total, "Keyword filter disabled (no include keywords)");
        }
        kept
    }
}

/// Filter `articles` by `include`/`exclude` keyword lists.
pub fn filter(articles: Vec<Article>, include: &[String], exclude: &[String]) -> Vec<Article> {
    KeywordFilter::new(include, exclude).filter(articles)
}
