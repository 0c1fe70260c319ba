//! Shared types for the turno rotation suite
//!
//! Wire DTOs, error types and the API response envelope used by both
//! turno-client and turno-api-mock. Field names follow the backend's
//! camelCase Spanish contract via serde renames.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use response::ApiResponse;
