//! Wire data models
//!
//! Shared between turno-api-mock and turno-client. Field names follow the
//! backend's camelCase contract (`#[serde(rename_all = "camelCase")]`);
//! all IDs are `i64`.

pub mod block;
pub mod reassignment;
pub mod user;

// Re-exports
pub use block::*;
pub use reassignment::*;
pub use user::*;
