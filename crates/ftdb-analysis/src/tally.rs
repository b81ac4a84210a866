//! Insertion-ordered mention tally and brand ranking.

use std::collections::HashMap;

use serde::Serialize;

use crate::matcher::BrandHit;

/// Running mention counts keyed by canonical brand name.
///
/// First-encounter order is preserved and breaks ties in the final ranking.
/// Counts only increase within a run. When work is parallelized, keep one
/// tally per worker and [`merge`](Self::merge) them afterwards.
#[derive(Debug, Clone, Default)]
pub struct MentionTally {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl MentionTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` mentions for a brand. Zero counts are ignored so a brand
    /// only enters the encounter order once it has actually been seen.
    pub fn record(&mut self, brand: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(brand) {
            Some(existing) => *existing = existing.saturating_add(count),
            None => {
                self.order.push(brand.to_string());
                self.counts.insert(brand.to_string(), count);
            }
        }
    }

    /// Fold a batch of matcher hits into the tally.
    pub fn extend_hits<I: IntoIterator<Item = BrandHit>>(&mut self, hits: I) {
        for hit in hits {
            self.record(&hit.brand, hit.count);
        }
    }

    /// Merge another tally into this one (reduce step for per-worker
    /// tallies). Brands unseen here are appended in `other`'s encounter
    /// order.
    pub fn merge(&mut self, other: MentionTally) {
        for brand in other.order {
            if let Some(&count) = other.counts.get(&brand) {
                self.record(&brand, count);
            }
        }
    }

    /// Sum of all mention counts.
    #[must_use]
    pub fn total_mentions(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Brands with their counts, in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order
            .iter()
            .map(|brand| (brand.as_str(), self.counts[brand]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One row of the final brand ranking.
#[derive(Debug, Clone, Serialize)]
pub struct BrandRanking {
    /// 1-based rank.
    pub position: u32,
    pub brand: String,
    pub mentions: u64,
    /// Share of ALL mentions in the run, not just the displayed top-N.
    pub percentage: f64,
}

/// Rank the full tally by mention count, highest first.
///
/// Ties keep first-encounter order (stable sort). Percentages are computed
/// over the whole tally; any top-N cut happens at presentation time.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rank_mentions(tally: &MentionTally) -> Vec<BrandRanking> {
    let total = tally.total_mentions();

    let mut entries: Vec<(&str, u64)> = tally.iter().collect();
    entries.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (brand, mentions))| BrandRanking {
            position: u32::try_from(i + 1).unwrap_or(u32::MAX),
            brand: brand.to_string(),
            mentions,
            percentage: if total == 0 {
                0.0
            } else {
                mentions as f64 / total as f64 * 100.0
            },
        })
        .collect()
}
