//! HTTP client for SerpAPI search endpoints.

use std::time::Duration;

use ftdb_analysis::{SearchProvider, SearchResult};

use crate::error::SerpApiError;
use crate::normalize::normalize_response;
use crate::types::SerpApiResponse;

/// Which SerpAPI engine a client queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEngine {
    Google,
    GoogleShopping,
}

impl SearchEngine {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchEngine::Google => "google",
            SearchEngine::GoogleShopping => "google_shopping",
        }
    }
}

/// Locale and sizing parameters sent with every query.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub engine: SearchEngine,
    /// Google `gl` country code.
    pub country: String,
    /// Google `hl` interface language.
    pub language: String,
    /// Results requested per query (`num`).
    pub per_query: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Google,
            country: "br".to_string(),
            language: "pt".to_string(),
            per_query: 5,
        }
    }
}

/// Client for one SerpAPI engine.
///
/// The base URL is injectable so tests can point at a local mock server.
/// There is deliberately no retry here: one lookup costs one unit of the
/// caller's budget, attempt included.
pub struct SerpApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    params: SearchParams,
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl SerpApiClient {
    /// Create a client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        params: SearchParams,
    ) -> Result<Self, SerpApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            params,
        })
    }

    /// Run one query and normalize the response.
    ///
    /// # Errors
    ///
    /// - [`SerpApiError::Http`] — network failure or body read error.
    /// - [`SerpApiError::UnexpectedStatus`] — non-2xx response.
    /// - [`SerpApiError::Api`] — 200 response carrying an `error` payload.
    pub async fn fetch(&self, query: &str) -> Result<SearchResult, SerpApiError> {
        let num = self.params.per_query.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", self.params.engine.as_str()),
                ("q", query),
                ("gl", &self.params.country),
                ("hl", &self.params.language),
                ("num", &num),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SerpApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.base_url.clone(),
            });
        }

        let raw: SerpApiResponse = response.json().await?;
        if let Some(message) = raw.error {
            return Err(SerpApiError::Api(message));
        }

        tracing::debug!(
            query,
            organic = raw.organic_results.len(),
            shopping = raw.shopping_results.len(),
            "SerpAPI response received"
        );
        Ok(normalize_response(raw))
    }
}

impl SearchProvider for SerpApiClient {
    type Error = SerpApiError;

    async fn search(&self, query: &str) -> Result<SearchResult, SerpApiError> {
        self.fetch(query).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
