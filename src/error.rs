//! Error types for the OpenAlex works client.

use std::time::Duration;

/// Errors that can occur when fetching or rendering an OpenAlex work.
#[derive(Debug, thiserror::Error)]
pub enum WorksError {
    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// OpenAlex returned a non-success status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Work not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by OpenAlex (HTTP 429).
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Response body is not valid JSON or has the wrong shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A field required by the requested operation is absent or null.
    #[error("Missing field in work record: {0}")]
    MissingField(&'static str),

    /// Export attempted for a work type the format cannot express.
    #[error("Unsupported work type for export: {0}")]
    UnsupportedType(String),

    /// The author list was empty where a last author is required.
    #[error("Work has no authors")]
    EmptyAuthorList,

    /// Identifier was empty.
    #[error("Invalid work identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Citation chart could not be encoded.
    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl WorksError {
    /// True for transport and HTTP-status failures.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch(_) | Self::Api { .. } | Self::NotFound(_) | Self::RateLimited { .. }
        )
    }
}

/// Convenience alias for Results using [`WorksError`].
pub type Result<T> = std::result::Result<T, WorksError>;
