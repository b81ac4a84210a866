use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerpApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// SerpAPI returned 200 with an `error` field in the body (bad key,
    /// exhausted quota, unsupported engine).
    #[error("SerpAPI error: {0}")]
    Api(String),
}
