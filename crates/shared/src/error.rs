//! Client-side API error type.

use thiserror::Error;

/// Errors surfaced by the HTTP API clients.
///
/// Response bodies are opaque to the client core; only the status code is
/// inspected. The body is carried along so UI code can show it if it wants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// Status code, if this error came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error is in the authentication failure class that
    /// invalidates the session (401, 403 or 404).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Http {
                status: 401 | 403 | 404,
                ..
            }
        )
    }
}
