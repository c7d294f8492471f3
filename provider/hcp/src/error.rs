//! Provider-specific error types.
//!
//! This module defines the errors surfaced to the plugin host by resource
//! and data-source handlers. Remote API failures are wrapped from the client
//! crate; everything else is detected locally.

use hcp_client::HcpError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in provider handlers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HCP API error
    #[error("HCP error: {0}")]
    Client(#[from] HcpError),

    /// Field value rejected before any remote call
    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    /// Two fields that cannot be combined (or one of which is required)
    #[error("Conflicting configuration: {message} (fields: {first}, {second})")]
    ConflictingConfig {
        first: String,
        second: String,
        message: String,
    },

    /// Link string not in a recognized shape
    #[error("Invalid link {0:?}: expected /project/{{project_id}}/{{type}}/{{id}} or /project/{{project_id}}/region/{{provider}}/{{region}}/{{type}}/{{id}}")]
    InvalidLink(String),

    /// Link decoded to a different resource type than the caller needs
    #[error("Link type mismatch: expected {expected:?}, found {actual:?}")]
    LinkTypeMismatch { expected: String, actual: String },

    /// Import ID with the wrong segment count or an empty segment
    #[error("Invalid import ID {id:?}: expected {formats}")]
    InvalidImportId { id: String, formats: String },

    /// Remote operation reached DONE with an error
    #[error("Unable to complete {name} (operation {operation_id}): {message}")]
    OperationFailed {
        name: String,
        operation_id: String,
        message: String,
    },

    /// Deadline passed before the remote side reported a terminal state
    #[error("Timed out after {timeout:?} waiting for {name} (operation {operation_id})")]
    OperationTimeout {
        name: String,
        operation_id: String,
        timeout: Duration,
    },

    /// Lookup where absence is invalid
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider configuration incomplete or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Planned change to an attribute that cannot be updated in place
    #[error("{resource} does not support in-place update of {attributes:?}")]
    UpdateNotSupported {
        resource: String,
        attributes: Vec<String>,
    },

    /// State could not be mapped to or from the host representation
    #[error("State mapping error for {resource}: {source}")]
    Wire {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// Whether this is the distinguished "resource does not exist" class
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::Client(e) => e.is_not_found(),
            ProviderError::NotFound(_) => true,
            _ => false,
        }
    }

    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        ProviderError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let remote = ProviderError::from(HcpError::NotFound("HVN x not found".to_string()));
        assert!(remote.is_not_found());
        assert!(ProviderError::NotFound("project".to_string()).is_not_found());

        let api = ProviderError::from(HcpError::Api {
            status: 500,
            message: "boom".to_string(),
        });
        assert!(!api.is_not_found());
        assert!(!ProviderError::validation("hvn_id", "too short").is_not_found());
    }

    #[test]
    fn test_conflict_message_names_both_fields() {
        let err = ProviderError::ConflictingConfig {
            first: "token".to_string(),
            second: "client_id".to_string(),
            message: "exactly one must be set".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("token"));
        assert!(text.contains("client_id"));
    }
}
