//! In-memory mock of the reservation-block API
//!
//! Speaks the production wire contract (envelope, JWT bearer auth,
//! reassignment rules) over a seeded rotation plan. Used as a standalone
//! dev server and in-process by the client integration tests.

pub mod api;
pub mod state;

pub use api::router;
pub use state::AppState;
