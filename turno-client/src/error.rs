//! Client error types

use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401 after refresh attempt)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Envelope-level API failure (success == false)
    #[error("API error {code}: {message}")]
    Api { code: ErrorCode, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the failure is transient (network/timeout), meaning a manual
    /// retry of the same action may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { code, .. } => {
                matches!(code, ErrorCode::NetworkError | ErrorCode::TimeoutError)
            }
            _ => false,
        }
    }
}

impl From<shared::AppError> for ClientError {
    fn from(err: shared::AppError) -> Self {
        Self::Api {
            code: err.code,
            message: err.message,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_api_codes() {
        let network = ClientError::Api {
            code: ErrorCode::NetworkError,
            message: "connection dropped".to_string(),
        };
        let timeout = ClientError::Api {
            code: ErrorCode::TimeoutError,
            message: "request timed out".to_string(),
        };
        assert!(network.is_transient());
        assert!(timeout.is_transient());
    }

    #[test]
    fn test_business_errors_are_not_transient() {
        assert!(!ClientError::Unauthorized.is_transient());
        assert!(!ClientError::Validation("motivo required".to_string()).is_transient());
        let rejected = ClientError::Api {
            code: ErrorCode::DestinationBlockFull,
            message: "no free spaces".to_string(),
        };
        assert!(!rejected.is_transient());
    }
}
