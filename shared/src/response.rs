//! API Response types
//!
//! Standardized response envelope for the reservation-block API.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

/// Unified API response structure
///
/// All endpoints answer with this envelope:
/// ```json
/// {
///     "success": true,
///     "data": { ... },
///     "errorMsg": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_msg: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_msg: Some(message.into()),
        }
    }

    /// Unwrap the envelope into a result
    ///
    /// A response with `success == false`, or one missing its `data`
    /// payload, becomes an error.
    pub fn into_result(self) -> Result<T, AppError> {
        if !self.success {
            let msg = self
                .error_msg
                .unwrap_or_else(|| "Operation failed".to_string());
            return Err(AppError::with_message(ErrorCode::OperationFailed, msg));
        }
        self.data.ok_or_else(|| {
            AppError::with_message(ErrorCode::InvalidFormat, "Response missing data payload")
        })
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self::error(err.message)
    }
}
