use std::path::PathBuf;

/// Application configuration, read from env vars by [`crate::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// SerpAPI key used by the fetch layer. Optional so help output, dry
    /// runs, and report-only invocations work without one; commands that
    /// issue lookups require it at client-construction time.
    pub serpapi_api_key: Option<String>,
    /// SerpAPI endpoint; overridable for tests.
    pub serpapi_base_url: String,
    /// Postgres connection string. Optional so dry runs work without a DB.
    pub database_url: Option<String>,
    pub log_level: String,
    pub keywords_path: PathBuf,
    pub brands_path: PathBuf,
    pub lexicon_path: PathBuf,
    /// Optional weight/threshold override file; defaults apply when unset.
    pub scoring_path: Option<PathBuf>,
    /// Maximum provider lookups per run.
    pub max_lookups: u32,
    /// Organic results requested per query.
    pub results_per_query: u32,
    /// Google `gl` country code for queries.
    pub search_country: String,
    /// Google `hl` interface language for queries.
    pub search_language: String,
    pub request_timeout_secs: u64,
    /// Pause between consecutive lookups, to stay polite with the provider.
    pub inter_request_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "serpapi_api_key",
                &self.serpapi_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("serpapi_base_url", &self.serpapi_base_url)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("keywords_path", &self.keywords_path)
            .field("brands_path", &self.brands_path)
            .field("lexicon_path", &self.lexicon_path)
            .field("scoring_path", &self.scoring_path)
            .field("max_lookups", &self.max_lookups)
            .field("results_per_query", &self.results_per_query)
            .field("search_country", &self.search_country)
            .field("search_language", &self.search_language)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .finish()
    }
}
