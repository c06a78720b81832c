use thiserror::Error;

/// Failures at the API-client boundary. The reconciliation engine itself is
/// total over its input domain and never returns one of these.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid reporting month {0:?} (expected YYYY-MM)")]
    InvalidMonth(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected payload from {url}: {reason}")]
    UnexpectedPayload { url: String, reason: String },
}
