//! Turno Client - HTTP client for the reservation-block API
//!
//! Typed wrappers over the REST surface: rotation queries, candidate
//! listing, employee reassignment and user detail, with bearer-token
//! authentication and a single refresh-and-retry on 401.

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod session;

pub use cache::QueryCache;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, TokenSource};
pub use services::{BlockFilter, BlocksApi, UsersApi};
pub use session::Session;

// Re-export shared types for convenience
pub use shared::ApiResponse;
pub use shared::models::{
    BlocksByDateResponse, BlocksResponse, ChangeEmployeeRequest, ChangeEmployeeResponse,
    ReservationBlock, UserDetail,
};
