use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com/search.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var carries an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from env vars already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an env var carries an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    Ok(AppConfig {
        serpapi_api_key: lookup("SERPAPI_API_KEY").ok(),
        serpapi_base_url: or_default("FTDB_SERPAPI_BASE_URL", DEFAULT_SERPAPI_BASE_URL),
        database_url: lookup("DATABASE_URL").ok(),
        log_level: or_default("FTDB_LOG_LEVEL", "info"),
        keywords_path: PathBuf::from(or_default("FTDB_KEYWORDS_PATH", "config/keywords.yaml")),
        brands_path: PathBuf::from(or_default("FTDB_BRANDS_PATH", "config/brands.yaml")),
        lexicon_path: PathBuf::from(or_default("FTDB_LEXICON_PATH", "config/lexicon.yaml")),
        scoring_path: lookup("FTDB_SCORING_PATH").ok().map(PathBuf::from),
        max_lookups: parse_u32("FTDB_MAX_LOOKUPS", "10")?,
        results_per_query: parse_u32("FTDB_RESULTS_PER_QUERY", "5")?,
        search_country: or_default("FTDB_SEARCH_COUNTRY", "br"),
        search_language: or_default("FTDB_SEARCH_LANGUAGE", "pt"),
        request_timeout_secs: parse_u64("FTDB_REQUEST_TIMEOUT_SECS", "30")?,
        inter_request_delay_ms: parse_u64("FTDB_INTER_REQUEST_DELAY_MS", "2000")?,
    })
}
