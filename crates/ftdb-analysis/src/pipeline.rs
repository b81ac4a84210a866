//! Budgeted batch drivers for keyword and brand runs.

use std::collections::BTreeMap;
use std::future::Future;

use ftdb_core::{ScoringWeights, StatusThresholds, TrendLexicon};
use serde::Serialize;

use crate::budget::LookupBudget;
use crate::dedup::dedup_by_key;
use crate::matcher::BrandMatcher;
use crate::scorer::{rank_keywords, score_keyword};
use crate::tally::MentionTally;
use crate::types::{KeywordAnalysis, SearchResult};

/// The fetch boundary: one normalized search result per query.
///
/// Implemented by the SerpAPI client in production and by fixture stubs in
/// tests. Errors are displayed and absorbed by the batch drivers, never
/// propagated: a failed lookup becomes a zero-valued analysis.
pub trait SearchProvider {
    /// `Send` so batch futures can be driven from spawned tasks.
    type Error: std::fmt::Display + Send;

    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResult, Self::Error>> + Send;
}

/// The ranked outcome of one keyword batch, plus its summary scalars.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordBatchReport {
    /// Analyses ranked by popularity score descending, input order on ties.
    pub analyses: Vec<KeywordAnalysis>,
    pub total_keywords: usize,
    pub average_score: f64,
    pub lookups_used: u32,
    /// How many keyword analyses each indicator appeared in.
    pub indicator_frequencies: BTreeMap<String, u64>,
}

/// Score a batch of keywords against the provider.
///
/// Each keyword is evaluated independently; order never affects individual
/// scores. A provider failure is logged and yields the zero analysis for
/// that keyword. Once the budget is exhausted no further lookups are issued
/// and the remaining keywords are left out — analyses for already-fetched
/// keywords are still ranked and returned.
pub async fn run_keyword_analysis<P: SearchProvider>(
    provider: &P,
    keywords: &[String],
    lexicon: &TrendLexicon,
    weights: &ScoringWeights,
    thresholds: &StatusThresholds,
    budget: &mut LookupBudget,
) -> KeywordBatchReport {
    let mut analyses = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        if !budget.try_take() {
            tracing::warn!(
                analyzed = analyses.len(),
                total = keywords.len(),
                "lookup budget exhausted; stopping keyword batch early"
            );
            break;
        }

        let analysis = match provider.search(keyword).await {
            Ok(result) => score_keyword(keyword, Some(&result), lexicon, weights, thresholds),
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "lookup failed; recording zero analysis");
                score_keyword(keyword, None, lexicon, weights, thresholds)
            }
        };
        tracing::debug!(
            keyword = %keyword,
            score = analysis.popularity_score,
            status = %analysis.status,
            "keyword scored"
        );
        analyses.push(analysis);
    }

    let mut indicator_frequencies: BTreeMap<String, u64> = BTreeMap::new();
    for analysis in &analyses {
        for indicator in &analysis.trend_indicators {
            *indicator_frequencies.entry(indicator.clone()).or_insert(0) += 1;
        }
    }

    rank_keywords(&mut analyses);

    #[allow(clippy::cast_precision_loss)]
    let average_score = if analyses.is_empty() {
        0.0
    } else {
        let sum: f64 = analyses.iter().map(|a| f64::from(a.popularity_score)).sum();
        sum / analyses.len() as f64
    };

    KeywordBatchReport {
        total_keywords: analyses.len(),
        average_score,
        lookups_used: budget.used(),
        indicator_frequencies,
        analyses,
    }
}

/// One searched result with the brands found in it, kept for raw persistence.
#[derive(Debug, Clone, Serialize)]
pub struct RawMatch {
    pub query: String,
    pub title: String,
    pub snippet: String,
    pub url: String,
    /// Canonical brand names, repeated once per occurrence.
    pub brands_found: Vec<String>,
}

/// The accumulated outcome of one brand run before ranking.
#[derive(Debug, Default)]
pub struct BrandMentionOutcome {
    pub tally: MentionTally,
    pub raw_matches: Vec<RawMatch>,
    pub lookups_used: u32,
}

impl BrandMentionOutcome {
    /// Combine a second outcome (e.g. a shopping pass) into this one.
    pub fn absorb(&mut self, other: BrandMentionOutcome) {
        self.tally.merge(other.tally);
        self.raw_matches.extend(other.raw_matches);
        self.lookups_used = self.lookups_used.saturating_add(other.lookups_used);
        self.dedup_raw();
    }

    /// Drop duplicate raw rows before persistence: first occurrence per URL
    /// wins; rows without a URL (knowledge panels) are keyed by title.
    fn dedup_raw(&mut self) {
        let raw = std::mem::take(&mut self.raw_matches);
        self.raw_matches = dedup_by_key(raw, |r| {
            if r.url.is_empty() {
                (String::new(), r.title.clone())
            } else {
                (r.url.clone(), String::new())
            }
        });
    }
}

/// Match known brands across the results of a batch of queries.
///
/// Every section of each result is scanned: organic hits (title + snippet),
/// shopping hits (title + seller), and the knowledge panel (title +
/// description). The tally only ever grows; provider failures contribute
/// nothing and are logged.
pub async fn run_brand_analysis<P: SearchProvider>(
    provider: &P,
    queries: &[String],
    matcher: &BrandMatcher,
    budget: &mut LookupBudget,
) -> BrandMentionOutcome {
    let mut outcome = BrandMentionOutcome::default();
    let used_before = budget.used();

    for query in queries {
        if !budget.try_take() {
            tracing::warn!(query = %query, "lookup budget exhausted; stopping brand batch early");
            break;
        }

        match provider.search(query).await {
            Ok(result) => {
                let found = extract_mentions(query, &result, matcher, &mut outcome.tally);
                tracing::debug!(query = %query, mentions = found.len(), "brand mentions extracted");
                outcome.raw_matches.extend(found);
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "lookup failed; no mentions recorded");
            }
        }
    }

    outcome.lookups_used = budget.used() - used_before;
    outcome.dedup_raw();
    outcome
}

/// Scan one result's sections, feeding the tally and producing raw rows.
fn extract_mentions(
    query: &str,
    result: &SearchResult,
    matcher: &BrandMatcher,
    tally: &mut MentionTally,
) -> Vec<RawMatch> {
    let mut raw = Vec::new();

    let mut scan = |title: &str, snippet: &str, url: &str, haystack: String| {
        let hits = matcher.find_in_text(&haystack.to_lowercase());
        let mut brands_found = Vec::new();
        for hit in &hits {
            for _ in 0..hit.count {
                brands_found.push(hit.brand.clone());
            }
        }
        tally.extend_hits(hits);
        raw.push(RawMatch {
            query: query.to_string(),
            title: title.to_string(),
            snippet: snippet.to_string(),
            url: url.to_string(),
            brands_found,
        });
    };

    for hit in &result.organic {
        scan(
            &hit.title,
            &hit.snippet,
            &hit.url,
            format!("{} {}", hit.title, hit.snippet),
        );
    }

    for hit in &result.shopping {
        scan(
            &hit.title,
            &format!("Shopping: {}", hit.source),
            &hit.url,
            format!("{} {}", hit.title, hit.source),
        );
    }

    if let Some(panel) = &result.knowledge_panel {
        scan(
            &format!("Knowledge panel: {}", panel.title),
            &panel.description,
            "",
            format!("{} {}", panel.title, panel.description),
        );
    }

    raw
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use ftdb_core::KnownBrandSet;

    use super::*;
    use crate::tally::rank_mentions;
    use crate::types::{KnowledgePanel, OrganicHit, ShoppingHit};

    /// Fixture provider: canned results per query, errors for unknown ones.
    struct StubProvider {
        results: HashMap<String, SearchResult>,
    }

    impl StubProvider {
        fn new(entries: Vec<(&str, SearchResult)>) -> Self {
            Self {
                results: entries
                    .into_iter()
                    .map(|(q, r)| (q.to_string(), r))
                    .collect(),
            }
        }
    }

    impl SearchProvider for StubProvider {
        type Error = String;

        async fn search(&self, query: &str) -> Result<SearchResult, String> {
            self.results
                .get(query)
                .cloned()
                .ok_or_else(|| format!("no fixture for '{query}'"))
        }
    }

    fn organic_result(hits: &[(&str, &str)]) -> SearchResult {
        SearchResult {
            organic: hits
                .iter()
                .map(|&(title, snippet)| OrganicHit {
                    title: title.to_string(),
                    snippet: snippet.to_string(),
                    url: format!("https://example.com/{}", title.replace(' ', "-")),
                })
                .collect(),
            ..SearchResult::default()
        }
    }

    fn lexicon() -> TrendLexicon {
        TrendLexicon::from_words(["viral", "2025"], ["moda"]).unwrap()
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn ranks_batch_and_reports_stats() {
        let provider = StubProvider::new(vec![
            ("fraco", organic_result(&[("um look", "")])),
            (
                "forte",
                organic_result(&[("viral 2025", ""), ("look", ""), ("look b", "")]),
            ),
        ]);
        let mut budget = LookupBudget::new(10);
        let report = run_keyword_analysis(
            &provider,
            &keywords(&["fraco", "forte"]),
            &lexicon(),
            &ScoringWeights::default(),
            &StatusThresholds::default(),
            &mut budget,
        )
        .await;

        assert_eq!(report.total_keywords, 2);
        assert_eq!(report.lookups_used, 2);
        // forte: 3*15 + 2*8 = 61; fraco: 15.
        assert_eq!(report.analyses[0].keyword, "forte");
        assert_eq!(report.analyses[0].popularity_score, 61);
        assert_eq!(report.analyses[1].popularity_score, 15);
        assert!((report.average_score - 38.0).abs() < f64::EPSILON);
        assert_eq!(report.indicator_frequencies.get("viral"), Some(&1));
    }

    #[tokio::test]
    async fn failed_lookup_becomes_zero_analysis() {
        let provider = StubProvider::new(vec![("ok", organic_result(&[("look", "")]))]);
        let mut budget = LookupBudget::new(10);
        let report = run_keyword_analysis(
            &provider,
            &keywords(&["ok", "missing"]),
            &lexicon(),
            &ScoringWeights::default(),
            &StatusThresholds::default(),
            &mut budget,
        )
        .await;

        assert_eq!(report.total_keywords, 2);
        assert_eq!(report.lookups_used, 2);
        let zero = report
            .analyses
            .iter()
            .find(|a| a.keyword == "missing")
            .unwrap();
        assert_eq!(zero.popularity_score, 0);
    }

    #[tokio::test]
    async fn budget_stops_new_lookups_but_keeps_fetched() {
        let provider = StubProvider::new(vec![
            ("a", organic_result(&[("look", "")])),
            ("b", organic_result(&[("look", "")])),
            ("c", organic_result(&[("look", "")])),
        ]);
        let mut budget = LookupBudget::new(2);
        let report = run_keyword_analysis(
            &provider,
            &keywords(&["a", "b", "c"]),
            &lexicon(),
            &ScoringWeights::default(),
            &StatusThresholds::default(),
            &mut budget,
        )
        .await;

        assert_eq!(report.total_keywords, 2);
        assert_eq!(report.lookups_used, 2);
        assert!(report.analyses.iter().all(|a| a.keyword != "c"));
    }

    #[tokio::test]
    async fn tie_scores_keep_input_order() {
        let provider = StubProvider::new(vec![
            ("primeiro", organic_result(&[("look", "")])),
            ("segundo", organic_result(&[("look", "")])),
        ]);
        let mut budget = LookupBudget::new(10);
        let report = run_keyword_analysis(
            &provider,
            &keywords(&["primeiro", "segundo"]),
            &lexicon(),
            &ScoringWeights::default(),
            &StatusThresholds::default(),
            &mut budget,
        )
        .await;

        assert_eq!(report.analyses[0].keyword, "primeiro");
        assert_eq!(report.analyses[1].keyword, "segundo");
    }

    fn brand_matcher() -> BrandMatcher {
        BrandMatcher::new(&KnownBrandSet::from_names(["nike", "zara", "adidas"]).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn brand_run_scans_all_sections() {
        let result = SearchResult {
            organic: vec![OrganicHit {
                title: "Nike e Zara lideram".to_string(),
                snippet: "nike em alta".to_string(),
                url: "https://example.com/materia".to_string(),
            }],
            shopping: vec![ShoppingHit {
                title: "Tênis Adidas".to_string(),
                source: "Loja Zara".to_string(),
                url: "https://shop.example.com/1".to_string(),
            }],
            knowledge_panel: Some(KnowledgePanel {
                title: "Nike".to_string(),
                description: "marca esportiva".to_string(),
            }),
            related_searches: Vec::new(),
        };
        let provider = StubProvider::new(vec![("marcas de moda", result)]);
        let mut budget = LookupBudget::new(5);
        let outcome = run_brand_analysis(
            &provider,
            &keywords(&["marcas de moda"]),
            &brand_matcher(),
            &mut budget,
        )
        .await;

        assert_eq!(outcome.lookups_used, 1);
        // organic: nike x2, zara x1; shopping: adidas x1, zara x1; panel: nike x1.
        let entries: Vec<(&str, u64)> = outcome.tally.iter().collect();
        assert_eq!(entries, [("Nike", 3), ("Zara", 2), ("Adidas", 1)]);
        assert_eq!(outcome.raw_matches.len(), 3);

        let ranking = rank_mentions(&outcome.tally);
        assert_eq!(ranking[0].brand, "Nike");
        assert!((ranking[0].percentage - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn raw_matches_dedup_by_url() {
        let result_a = organic_result(&[("materia nike", "")]);
        let mut result_b = organic_result(&[("materia nike", "")]);
        result_b.organic[0].snippet = "zara".to_string();

        let provider = StubProvider::new(vec![("a", result_a), ("b", result_b)]);
        let mut budget = LookupBudget::new(5);
        let outcome = run_brand_analysis(
            &provider,
            &keywords(&["a", "b"]),
            &brand_matcher(),
            &mut budget,
        )
        .await;

        // Both queries returned the same URL; only the first raw row is kept,
        // but the tally still counts both results' mentions.
        assert_eq!(outcome.raw_matches.len(), 1);
        assert_eq!(outcome.tally.total_mentions(), 3);
    }

    #[tokio::test]
    async fn absorb_merges_outcomes() {
        let provider = StubProvider::new(vec![
            ("web", organic_result(&[("nike em alta", "")])),
            ("shopping", organic_result(&[("promoção zara", "")])),
        ]);
        let mut budget = LookupBudget::new(5);
        let mut outcome = run_brand_analysis(
            &provider,
            &keywords(&["web"]),
            &brand_matcher(),
            &mut budget,
        )
        .await;
        let second = run_brand_analysis(
            &provider,
            &keywords(&["shopping"]),
            &brand_matcher(),
            &mut budget,
        )
        .await;
        outcome.absorb(second);

        assert_eq!(outcome.lookups_used, 2);
        let entries: Vec<(&str, u64)> = outcome.tally.iter().collect();
        assert_eq!(entries, [("Nike", 1), ("Zara", 1)]);
        assert_eq!(outcome.raw_matches.len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_contributes_nothing() {
        let provider = StubProvider::new(vec![]);
        let mut budget = LookupBudget::new(5);
        let outcome = run_brand_analysis(
            &provider,
            &keywords(&["sem fixture"]),
            &brand_matcher(),
            &mut budget,
        )
        .await;

        assert!(outcome.tally.is_empty());
        assert!(outcome.raw_matches.is_empty());
        assert_eq!(outcome.lookups_used, 1);
    }
}
