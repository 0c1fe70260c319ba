//! Typed API services

pub mod blocks;
pub mod users;

pub use blocks::{BlockFilter, BlocksApi};
pub use users::UsersApi;
