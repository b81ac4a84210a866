use std::collections::BTreeSet;

use serde::Serialize;

/// One organic search hit.
#[derive(Debug, Clone, Default)]
pub struct OrganicHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// One shopping sub-result.
#[derive(Debug, Clone, Default)]
pub struct ShoppingHit {
    pub title: String,
    /// Seller or storefront name as reported by the provider.
    pub source: String,
    pub url: String,
}

/// Knowledge-panel section, when the provider returned one.
#[derive(Debug, Clone, Default)]
pub struct KnowledgePanel {
    pub title: String,
    pub description: String,
}

/// A normalized search response for one query.
///
/// Produced per query by the fetch layer and consumed immediately. Absent
/// sections are simply empty; the scorer treats them as contributing nothing.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub organic: Vec<OrganicHit>,
    pub shopping: Vec<ShoppingHit>,
    pub knowledge_panel: Option<KnowledgePanel>,
    pub related_searches: Vec<String>,
}

/// Qualitative trend classification derived from score and indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    StrongUpward,
    ModerateUpward,
    HighInterest,
    StablePotential,
    Stable,
    LowInterest,
    Minimal,
}

impl TrendStatus {
    /// Human-readable label, also the form persisted to the database.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TrendStatus::StrongUpward => "strong upward trend",
            TrendStatus::ModerateUpward => "moderate upward trend",
            TrendStatus::HighInterest => "high interest, no strong signal",
            TrendStatus::StablePotential => "stable with potential",
            TrendStatus::Stable => "stable / moderate interest",
            TrendStatus::LowInterest => "low interest",
            TrendStatus::Minimal => "minimal interest",
        }
    }
}

impl std::fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The scored analysis of one keyword.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordAnalysis {
    pub keyword: String,
    /// Number of organic hits the lookup returned.
    pub result_count: u32,
    /// Distinct lexicon words found across all organic hits.
    pub trend_indicators: BTreeSet<String>,
    /// Up to five related search queries, provider order.
    pub related_searches: Vec<String>,
    /// Always in `[0, max_score]`.
    pub popularity_score: u32,
    pub status: TrendStatus,
}

impl KeywordAnalysis {
    /// The zero-valued analysis substituted when a lookup fails or is
    /// skipped. Keeps batch ranking going; see the error-handling contract.
    #[must_use]
    pub fn zero(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            result_count: 0,
            trend_indicators: BTreeSet::new(),
            related_searches: Vec::new(),
            popularity_score: 0,
            status: TrendStatus::Minimal,
        }
    }
}
