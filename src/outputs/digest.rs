//! Human-readable text digest.
//!
//! The digest is meant for a quick skim before the downstream analysis step:
//! per-source statistics, the most frequent topics, and every article grouped
//! by source.

use super::summary::{TOP_N, rank, source_ranking};
use crate::models::{Article, ArticleGroups};
use crate::utils::plain_excerpt;
use chrono::{DateTime, FixedOffset};
use itertools::Itertools;
use std::cmp::Reverse;
use std::fmt::Write;

const WIDTH: usize = 70;
const EXCERPT_CHARS: usize = 200;
const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

fn heavy() -> String {
    "=".repeat(WIDTH)
}

fn light() -> String {
    "─".repeat(WIDTH)
}

/// Render the digest. Times are shown in `generated_at`'s offset.
pub fn render(articles: &[Article], groups: &ArticleGroups, generated_at: DateTime<FixedOffset>) -> String {
    let mut out = String::new();
    let offset = generated_at.offset();

    // `fmt::Write` for `String` never fails.
    let _ = writeln!(out, "\n{}", heavy());
    let _ = writeln!(out, "NEWS DIGEST");
    let _ = writeln!(out, "{}", heavy());
    let _ = writeln!(out, "Generated: {}", generated_at.format(DISPLAY_FORMAT));
    let _ = writeln!(out, "Total articles: {}", articles.len());
    let _ = writeln!(out, "Sources: {}", groups.by_source.len());
    let _ = writeln!(out, "{}\n", heavy());

    let _ = writeln!(out, "\n{}", light());
    let _ = writeln!(out, "ARTICLES PER SOURCE");
    let _ = writeln!(out, "{}\n", light());
    for (source, count) in source_ranking(groups) {
        let _ = writeln!(out, "  • {source:30} → {count:3} articles");
    }

    if !groups.by_keyword.is_empty() {
        let _ = writeln!(out, "\n\n{}", light());
        let _ = writeln!(out, "TOP TOPICS (by keyword mentions)");
        let _ = writeln!(out, "{}\n", light());
        for (keyword, count) in rank(&groups.by_keyword).into_iter().take(TOP_N) {
            let _ = writeln!(out, "  📌 {keyword} → {count} articles");
        }
    }

    let _ = writeln!(out, "\n\n{}", heavy());
    let _ = writeln!(out, "ALL ARTICLES (grouped by source)");
    let _ = writeln!(out, "{}", heavy());

    for (source, members) in groups.by_source.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        let _ = writeln!(out, "\n{}", light());
        let _ = writeln!(out, "📰 {} ({} articles)", source.to_uppercase(), members.len());
        let _ = writeln!(out, "{}\n", light());

        let newest_first = ArticleGroups::resolve(articles, members).sorted_by_key(|a| Reverse(a.published));
        for (i, article) in newest_first.enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, article.title);
            let _ = writeln!(out, "   🔗 {}", article.url);
            let published = article.published.with_timezone(offset).format(DISPLAY_FORMAT);
            if article.published_is_estimated {
                let _ = writeln!(out, "   📅 {published} (estimated)");
            } else {
                let _ = writeln!(out, "   📅 {published}");
            }
            if !article.matched_keywords.is_empty() {
                let _ = writeln!(out, "   🏷️  Topics: {}", article.matched_keywords.join(", "));
            }
            let excerpt = plain_excerpt(&article.description, EXCERPT_CHARS);
            if !excerpt.is_empty() {
                let _ = writeln!(out, "   📝 {excerpt}...");
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "\n{}", heavy());
    let _ = writeln!(out, "NEXT STEP: ANALYSIS");
    let _ = writeln!(out, "{}\n", heavy());
    out.push_str("To cluster the news and rate its significance:\n\n");
    out.push_str("1. Load raw_articles_latest.json into your analysis assistant\n");
    out.push_str("2. Load criteria.yaml for context\n");
    out.push_str("3. Ask it to group the articles by topic, rate each topic\n");
    out.push_str("   against the criteria, and produce a report\n");
    out.push_str("4. Save the result as analyzed_digest_<date>.txt\n\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::group;
    use crate::models::fixtures::{article, at};

    fn generated_at() -> DateTime<FixedOffset> {
        at(12).with_timezone(&FixedOffset::east_opt(3 * 3600).unwrap())
    }

    fn sample() -> Vec<Article> {
        let mut a = article("https://x/1", "TechDaily", "Older chip story");
        a.published = at(8);
        a.matched_keywords = vec!["chip".into()];
        a.description = "<p>Details about the <b>chip</b></p>".into();
        let mut b = article("https://x/2", "TechDaily", "Newer chip story");
        b.published = at(10);
        b.matched_keywords = vec!["chip".into(), "AI".into()];
        let mut c = article("https://x/3", "AlphaWire", "Undated");
        c.published_is_estimated = true;
        c.matched_keywords = vec!["AI".into()];
        vec![a, b, c]
    }

    #[test]
    fn test_header_and_statistics() {
        let articles = sample();
        let text = render(&articles, &group(&articles), generated_at());
        assert!(text.contains("Generated: 06.05.2025 15:00"));
        assert!(text.contains("Total articles: 3"));
        assert!(text.contains("Sources: 2"));
        assert!(text.contains(&format!("  • {:30} → {:3} articles", "TechDaily", 2)));
        assert!(text.contains("TOP TOPICS"));
        assert!(text.contains("  📌 chip → 2 articles"));
    }

    #[test]
    fn test_sources_sorted_by_name_and_articles_newest_first() {
        let articles = sample();
        let text = render(&articles, &group(&articles), generated_at());
        let alpha = text.find("📰 ALPHAWIRE").unwrap();
        let tech = text.find("📰 TECHDAILY").unwrap();
        assert!(alpha < tech);

        let newer = text.find("Newer chip story").unwrap();
        let older = text.find("Older chip story").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_article_details() {
        let articles = sample();
        let text = render(&articles, &group(&articles), generated_at());
        assert!(text.contains("   📅 06.05.2025 11:00"));
        assert!(text.contains("   🏷️  Topics: chip, AI"));
        assert!(text.contains("   📝 Details about the chip..."));
        assert!(text.contains("(estimated)"));
    }

    #[test]
    fn test_no_topics_section_without_keywords() {
        let articles = vec![article("https://x/1", "TechDaily", "Plain")];
        let text = render(&articles, &group(&articles), generated_at());
        assert!(!text.contains("TOP TOPICS"));
        assert!(text.contains("NEXT STEP: ANALYSIS"));
    }
}
