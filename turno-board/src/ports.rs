//! Port traits decoupling the board from the HTTP client
//!
//! The board only needs a narrow slice of the API surface; these traits
//! carry that slice so tests can drive the state machines without a
//! network.

use async_trait::async_trait;
use shared::models::{
    BlocksByDateResponse, BlocksResponse, ChangeEmployeeRequest, ChangeEmployeeResponse, UserDetail,
};
use turno_client::{BlockFilter, BlocksApi, ClientResult, UsersApi};

/// Reservation-block queries and commands used by the board
#[async_trait]
pub trait BlocksPort: Send + Sync {
    /// Current and next block per group at a wall-clock instant
    async fn blocks_by_date(
        &self,
        fecha: &str,
        filter: BlockFilter,
        anio_objetivo: i32,
    ) -> ClientResult<BlocksByDateResponse>;

    /// All blocks of a group for a scheduling year
    async fn blocks_by_group(
        &self,
        anio_objetivo: i32,
        grupo_id: i64,
    ) -> ClientResult<BlocksResponse>;

    /// Move an employee between blocks
    async fn change_employee(
        &self,
        request: &ChangeEmployeeRequest,
    ) -> ClientResult<ChangeEmployeeResponse>;
}

/// User lookups used by the board
#[async_trait]
pub trait UsersPort: Send + Sync {
    async fn user_by_id(&self, id: i64) -> ClientResult<UserDetail>;
}

#[async_trait]
impl BlocksPort for BlocksApi {
    async fn blocks_by_date(
        &self,
        fecha: &str,
        filter: BlockFilter,
        anio_objetivo: i32,
    ) -> ClientResult<BlocksByDateResponse> {
        BlocksApi::blocks_by_date(self, fecha, filter, anio_objetivo).await
    }

    async fn blocks_by_group(
        &self,
        anio_objetivo: i32,
        grupo_id: i64,
    ) -> ClientResult<BlocksResponse> {
        BlocksApi::blocks_by_group(self, anio_objetivo, grupo_id).await
    }

    async fn change_employee(
        &self,
        request: &ChangeEmployeeRequest,
    ) -> ClientResult<ChangeEmployeeResponse> {
        BlocksApi::change_employee(self, request).await
    }
}

#[async_trait]
impl UsersPort for UsersApi {
    async fn user_by_id(&self, id: i64) -> ClientResult<UserDetail> {
        UsersApi::user_by_id(self, id).await
    }
}
