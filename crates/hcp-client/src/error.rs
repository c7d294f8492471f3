//! HCP client errors

use thiserror::Error;

/// Errors that can occur when interacting with the HCP API
#[derive(Debug, Error)]
pub enum HcpError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HCP API returned a non-success status
    #[error("HCP API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Success response whose body did not match the expected model
    #[error("Decode error: {0}")]
    Decode(String),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl HcpError {
    /// Whether this is the distinguished "resource does not exist" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, HcpError::NotFound(_))
    }

    /// Whether a retry of the same request may succeed.
    ///
    /// Only transport-level failures and throttling/gateway statuses qualify.
    /// Domain errors (validation, not-found, auth) never do.
    pub fn is_transient(&self) -> bool {
        match self {
            HcpError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            HcpError::Api { status, .. } => is_transient_status(*status),
            _ => false,
        }
    }
}

/// Status codes retried by the HTTP layer
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}
