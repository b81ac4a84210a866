//! SerpAPI client for FTDB.
//!
//! Thin fetch boundary over SerpAPI's Google and Google Shopping engines.
//! Responses are normalized into `ftdb_analysis::SearchResult` so everything
//! downstream is provider-agnostic.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{SearchEngine, SearchParams, SerpApiClient};
pub use error::SerpApiError;
pub use normalize::normalize_response;
pub use types::SerpApiResponse;
