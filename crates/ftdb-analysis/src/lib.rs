//! Trend scoring and brand-mention analysis for FTDB.
//!
//! Two pure pipelines over normalized search results: the keyword trend
//! scorer (popularity score, trend status, ranking) and the brand mention
//! matcher (whole-word matching, insertion-ordered tally, ranking). Fetching
//! and persistence are collaborators behind the [`SearchProvider`] trait and
//! the caller, respectively; no I/O happens in this crate.

pub mod budget;
pub mod dedup;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod scorer;
pub mod tally;
pub mod types;

pub use budget::LookupBudget;
pub use dedup::dedup_by_key;
pub use error::AnalysisError;
pub use matcher::{BrandHit, BrandMatcher};
pub use pipeline::{
    run_brand_analysis, run_keyword_analysis, BrandMentionOutcome, KeywordBatchReport, RawMatch,
    SearchProvider,
};
pub use scorer::{classify_trend, rank_keywords, score_keyword};
pub use tally::{rank_mentions, BrandRanking, MentionTally};
pub use types::{
    KeywordAnalysis, KnowledgePanel, OrganicHit, SearchResult, ShoppingHit, TrendStatus,
};
