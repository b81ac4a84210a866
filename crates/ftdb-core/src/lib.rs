//! Shared configuration and reference data for FTDB.
//!
//! Loads the keyword list, known-brand roster, and trend lexicon from YAML,
//! plus the env-driven application config. All reference sets are validated
//! once at load and read-only afterwards.

use thiserror::Error;

pub mod app_config;
pub mod brands;
pub mod config;
pub mod keywords;
pub mod lexicon;
pub mod scoring;

pub use app_config::AppConfig;
pub use brands::{load_brands, KnownBrandSet};
pub use config::{load_app_config, load_app_config_from_env};
pub use keywords::{load_keywords, KeywordsFile};
pub use lexicon::{load_lexicon, TrendLexicon};
pub use scoring::{load_scoring, ScoringWeights, StatusThresholds};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file")]
    Parse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
