//! Reservation-block API service

use crate::{ClientError, ClientResult, HttpClient};
use shared::models::{
    BlocksByDateResponse, BlocksResponse, ChangeEmployeeRequest, ChangeEmployeeResponse,
};

/// Scope filter for the by-date rotation query
///
/// A specific group takes precedence over the whole area, matching the
/// selector behavior of the rotation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFilter {
    /// All groups of one area
    Area(i64),
    /// One specific group
    Group(i64),
}

impl BlockFilter {
    fn query_param(&self) -> String {
        match self {
            Self::Area(id) => format!("areaId={}", id),
            Self::Group(id) => format!("grupoId={}", id),
        }
    }
}

/// Typed wrapper for the `/api/bloques-reservacion` endpoints
#[derive(Debug, Clone)]
pub struct BlocksApi {
    http: HttpClient,
}

impl BlocksApi {
    /// Create the service over an existing HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Current and next block per group at the given wall-clock instant
    ///
    /// `fecha` is a local naive timestamp (`YYYY-MM-DDTHH:MM:SS`), see
    /// [`shared::util::wall_clock_now`].
    pub async fn blocks_by_date(
        &self,
        fecha: &str,
        filter: BlockFilter,
        anio_objetivo: i32,
    ) -> ClientResult<BlocksByDateResponse> {
        let path = format!(
            "api/bloques-reservacion/por-fecha?fecha={}&anioObjetivo={}&{}",
            fecha,
            anio_objetivo,
            filter.query_param()
        );
        tracing::debug!(fecha, anio_objetivo, ?filter, "fetching blocks by date");
        self.http.get(&path).await
    }

    /// All blocks of a group for a scheduling year (candidate listing)
    pub async fn blocks_by_group(
        &self,
        anio_objetivo: i32,
        grupo_id: i64,
    ) -> ClientResult<BlocksResponse> {
        let path = format!(
            "api/bloques-reservacion?anioObjetivo={}&grupoId={}",
            anio_objetivo, grupo_id
        );
        self.http.get(&path).await
    }

    /// Blocks an employee is assigned to in a scheduling year
    pub async fn blocks_by_employee(
        &self,
        empleado_id: i64,
        anio_objetivo: i32,
    ) -> ClientResult<BlocksResponse> {
        let path = format!(
            "api/bloques-reservacion/empleado/{}?anioObjetivo={}",
            empleado_id, anio_objetivo
        );
        self.http.get(&path).await
    }

    /// Move an employee from one block to another
    ///
    /// A confirmation with `cambioExitoso == false` is surfaced as an
    /// error: the server answered but did not apply the change.
    pub async fn change_employee(
        &self,
        request: &ChangeEmployeeRequest,
    ) -> ClientResult<ChangeEmployeeResponse> {
        let response: ChangeEmployeeResponse = self
            .http
            .post("api/bloques-reservacion/cambiar-empleado", request)
            .await?;

        if !response.cambio_exitoso {
            return Err(ClientError::InvalidResponse(
                "server reported the change as not applied".to_string(),
            ));
        }

        tracing::info!(
            empleado = %response.nombre_empleado,
            nomina = %response.nomina_empleado,
            origen = response.bloque_origen.numero_bloque,
            destino = response.bloque_destino.numero_bloque,
            "employee reassigned"
        );
        Ok(response)
    }
}
