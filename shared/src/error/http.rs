//! HTTP status code mapping and axum response conversion

use super::codes::ErrorCode;
use super::types::AppError;
use crate::response::ApiResponse;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::BlockNotFound
            | Self::GroupNotFound
            | Self::AreaNotFound
            | Self::EmployeeNotFound
            | Self::NoBlocksForYear => StatusCode::NOT_FOUND,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::RoleRequired | Self::AreaAdminRequired => {
                StatusCode::FORBIDDEN
            }

            // 409 Conflict (reassignment business rules)
            Self::DestinationBlockFull
            | Self::DestinationBlockStarted
            | Self::SameBlock
            | Self::EmployeeNotEligible => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient, client may retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::Unknown => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and remaining business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        let body = axum::Json(ApiResponse::<()>::from(self));
        (status, body).into_response()
    }
}
