//! Errors returned by [`crate::ApiClient`].

/// A rejected backend call.
///
/// Callers treat every variant as terminal for the current page load; there
/// is no transient/permanent split and no retry.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The backend answered with a non-2xx status.
    #[error("request failed with status code {status}")]
    Status { status: u16, body: String },
    /// The response body was not the JSON shape we expected.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// A 2xx response whose body reports failure.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
