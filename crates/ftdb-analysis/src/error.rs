use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A brand name produced an uncompilable word-boundary pattern. This is
    /// a configuration fault, not a data error: scoring and matching never
    /// fail on input data.
    #[error("invalid match pattern for brand '{brand}'")]
    BrandPattern {
        brand: String,
        #[source]
        source: regex::Error,
    },
}
