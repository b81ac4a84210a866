//! Keyword popularity scoring and trend-status classification.

use std::collections::BTreeSet;

use ftdb_core::{ScoringWeights, StatusThresholds, TrendLexicon};

use crate::types::{KeywordAnalysis, SearchResult, TrendStatus};

/// Score one keyword from its (possibly absent) search result.
///
/// `None` means the lookup failed or was never made; that yields the
/// zero-valued analysis rather than an error, so one dead lookup never
/// interrupts a batch.
///
/// The score is `organic_count * organic + |indicators| * indicator +
/// shopping_count * shopping + knowledge_panel bonus`, clamped to
/// `weights.max_score`. Indicators are lexicon words found as
/// case-insensitive substrings in any organic hit's title or snippet,
/// merged with set semantics.
#[must_use]
pub fn score_keyword(
    keyword: &str,
    result: Option<&SearchResult>,
    lexicon: &TrendLexicon,
    weights: &ScoringWeights,
    thresholds: &StatusThresholds,
) -> KeywordAnalysis {
    let Some(result) = result else {
        return KeywordAnalysis::zero(keyword);
    };

    let result_count = clamped_u32(result.organic.len());
    let trend_indicators = find_indicators(result, lexicon);
    let shopping_count = clamped_u32(result.shopping.len());

    let mut score = result_count
        .saturating_mul(weights.organic)
        .saturating_add(clamped_u32(trend_indicators.len()).saturating_mul(weights.indicator))
        .saturating_add(shopping_count.saturating_mul(weights.shopping));
    if result.knowledge_panel.is_some() {
        score = score.saturating_add(weights.knowledge_panel);
    }
    let popularity_score = score.min(weights.max_score);

    // The related-searches cap is configuration but never exceeds five.
    let related_limit = weights.related_limit.min(5);
    let related_searches: Vec<String> = result
        .related_searches
        .iter()
        .take(related_limit)
        .cloned()
        .collect();

    let status = classify_trend(popularity_score, &trend_indicators, lexicon, thresholds);

    KeywordAnalysis {
        keyword: keyword.to_string(),
        result_count,
        trend_indicators,
        related_searches,
        popularity_score,
        status,
    }
}

/// Collect lexicon words appearing in any organic hit's title or snippet.
///
/// Substring matching over lowercased text, deduplicated across hits.
fn find_indicators(result: &SearchResult, lexicon: &TrendLexicon) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for hit in &result.organic {
        let haystack = format!("{} {}", hit.title, hit.snippet).to_lowercase();
        for word in lexicon.words() {
            if haystack.contains(word) {
                found.insert(word.to_string());
            }
        }
    }
    found
}

/// Classify a scored keyword using the ordered status table.
///
/// The rows are checked top to bottom and the first match wins, so a score
/// of 80 with a strong indicator is "strong upward trend" even though it
/// also clears the plain high-interest cutoff.
#[must_use]
pub fn classify_trend(
    score: u32,
    indicators: &BTreeSet<String>,
    lexicon: &TrendLexicon,
    thresholds: &StatusThresholds,
) -> TrendStatus {
    let has_strong = indicators.iter().any(|w| lexicon.is_strong(w));
    let has_moderate = indicators.iter().any(|w| lexicon.is_moderate(w));

    if score >= thresholds.strong_upward && has_strong {
        TrendStatus::StrongUpward
    } else if score >= thresholds.moderate_upward && has_strong {
        TrendStatus::ModerateUpward
    } else if score >= thresholds.high_interest {
        TrendStatus::HighInterest
    } else if score >= thresholds.stable_potential && has_moderate {
        TrendStatus::StablePotential
    } else if score >= thresholds.stable {
        TrendStatus::Stable
    } else if score >= thresholds.low_interest {
        TrendStatus::LowInterest
    } else {
        TrendStatus::Minimal
    }
}

/// Rank analyses by popularity score, highest first.
///
/// `sort_by_key` is stable, so keywords with equal scores keep their input
/// order.
pub fn rank_keywords(analyses: &mut [KeywordAnalysis]) {
    analyses.sort_by_key(|a| std::cmp::Reverse(a.popularity_score));
}

fn clamped_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
