//! Mock reservation-block API
//!
//! Serves the same wire contract as the production backend: every payload
//! is wrapped in the `{ success, data, errorMsg }` envelope, auth is a
//! bearer JWT, and `cambiar-empleado` enforces the reassignment rules
//! (capacity, started destination, same block, eligibility).

use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
};
use chrono::{Duration, Local, NaiveDateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::client::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    BlockSummary, BlocksByDateResponse, BlocksResponse, ChangeEmployeeRequest,
    ChangeEmployeeResponse, GroupBlocks, QueryStatus, ReservationBlock, UserDetail,
};
use shared::response::ApiResponse;
use shared::util::{format_wall_clock, parse_wall_clock};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    sub: i64,
    exp: usize,
    /// Set on refresh tokens, which are not valid for API access
    #[serde(default)]
    refresh: bool,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_token))
        .route("/api/usuarios/{id}", get(user_by_id))
        .route("/api/bloques-reservacion", get(blocks_by_group))
        .route("/api/bloques-reservacion/por-fecha", get(blocks_by_date))
        .route("/api/bloques-reservacion/empleado/{id}", get(blocks_by_employee))
        .route("/api/bloques-reservacion/cambiar-empleado", post(change_employee))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Auth ====================

fn issue_token(state: &AppState, user_id: i64, refresh: bool, ttl: Duration) -> AppResult<String> {
    let exp = (Utc::now() + ttl).timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        exp,
        refresh,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("token encoding failed: {}", e)))
}

fn issue_pair(state: &AppState, user_id: i64) -> AppResult<(String, String)> {
    let token = issue_token(state, user_id, false, Duration::minutes(15))?;
    let refresh = issue_token(state, user_id, true, Duration::days(7))?;
    Ok((token, refresh))
}

fn decode_claims(state: &AppState, token: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::new(ErrorCode::TokenExpired),
        _ => AppError::new(ErrorCode::TokenInvalid),
    })
}

/// Extract and validate the bearer token, returning the caller's user id
fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<i64> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(AppError::not_authenticated)?;

    let claims = decode_claims(state, token)?;
    if claims.refresh {
        // refresh tokens only open the refresh endpoint
        return Err(AppError::new(ErrorCode::TokenInvalid));
    }
    Ok(claims.sub)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let user = state
        .find_user(&req.username)
        .filter(|u| u.password == req.password)
        .ok_or_else(AppError::invalid_credentials)?;

    let (token, refresh_token) = issue_pair(&state, user.detail.id)?;
    tracing::info!(username = %req.username, "login");
    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        refresh_token,
        user: user.detail.clone(),
    })))
}

async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<RefreshTokenResponse>>, AppError> {
    let claims = decode_claims(&state, &req.refresh_token)?;
    if !claims.refresh {
        return Err(AppError::new(ErrorCode::TokenInvalid));
    }
    let (token, refresh_token) = issue_pair(&state, claims.sub)?;
    tracing::debug!(user_id = claims.sub, "token refreshed");
    Ok(Json(ApiResponse::ok(RefreshTokenResponse {
        token,
        refresh_token,
    })))
}

// ==================== Users ====================

async fn user_by_id(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDetail>>, AppError> {
    authenticate(&state, &headers)?;
    let user = state
        .user_by_id(id)
        .ok_or_else(|| AppError::not_found("user").with_detail("id", id))?;
    Ok(Json(ApiResponse::ok(user)))
}

// ==================== Blocks ====================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByGroupQuery {
    anio_objetivo: i32,
    grupo_id: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByDateQuery {
    fecha: String,
    anio_objetivo: i32,
    area_id: Option<i64>,
    grupo_id: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ByEmployeeQuery {
    anio_objetivo: i32,
}

fn check_year(state: &AppState, anio_objetivo: i32) -> AppResult<()> {
    if anio_objetivo != state.anio_objetivo {
        return Err(AppError::new(ErrorCode::NoBlocksForYear).with_detail("anio", anio_objetivo));
    }
    Ok(())
}

fn block_start(block: &ReservationBlock) -> Option<NaiveDateTime> {
    parse_wall_clock(&block.fecha_hora_inicio)
}

fn block_end(block: &ReservationBlock) -> Option<NaiveDateTime> {
    parse_wall_clock(&block.fecha_hora_fin)
}

async fn blocks_by_group(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ByGroupQuery>,
) -> Result<Json<ApiResponse<BlocksResponse>>, AppError> {
    authenticate(&state, &headers)?;
    check_year(&state, query.anio_objetivo)?;

    let plan = state.plan.lock().expect("plan lock poisoned");
    let bloques: Vec<ReservationBlock> = plan
        .iter()
        .filter(|b| b.grupo_id == query.grupo_id)
        .cloned()
        .collect();
    if bloques.is_empty() {
        return Err(AppError::new(ErrorCode::GroupNotFound).with_detail("grupoId", query.grupo_id));
    }
    Ok(Json(ApiResponse::ok(BlocksResponse {
        total_bloques: bloques.len() as u32,
        bloques,
    })))
}

async fn blocks_by_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(empleado_id): Path<i64>,
    Query(query): Query<ByEmployeeQuery>,
) -> Result<Json<ApiResponse<BlocksResponse>>, AppError> {
    authenticate(&state, &headers)?;
    check_year(&state, query.anio_objetivo)?;

    let plan = state.plan.lock().expect("plan lock poisoned");
    let bloques: Vec<ReservationBlock> = plan
        .iter()
        .filter(|b| {
            b.empleados_asignados
                .iter()
                .any(|e| e.empleado_id == Some(empleado_id))
        })
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(BlocksResponse {
        total_bloques: bloques.len() as u32,
        bloques,
    })))
}

async fn blocks_by_date(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ByDateQuery>,
) -> Result<Json<ApiResponse<BlocksByDateResponse>>, AppError> {
    authenticate(&state, &headers)?;
    check_year(&state, query.anio_objetivo)?;

    let at = parse_wall_clock(&query.fecha)
        .ok_or_else(|| AppError::validation("fecha must be a local YYYY-MM-DDTHH:MM:SS timestamp"))?;

    let plan = state.plan.lock().expect("plan lock poisoned");
    let mut group_ids: Vec<i64> = plan
        .iter()
        .filter(|b| match (query.grupo_id, query.area_id) {
            (Some(grupo_id), _) => b.grupo_id == grupo_id,
            // single seeded area; an area filter means "all groups"
            (None, Some(_)) => true,
            (None, None) => false,
        })
        .map(|b| b.grupo_id)
        .collect();
    group_ids.sort_unstable();
    group_ids.dedup();
    if group_ids.is_empty() {
        return Err(AppError::validation("either grupoId or areaId is required"));
    }

    let bloques_por_grupo = group_ids
        .into_iter()
        .map(|grupo_id| {
            let mut of_group: Vec<&ReservationBlock> =
                plan.iter().filter(|b| b.grupo_id == grupo_id).collect();
            of_group.sort_by_key(|b| b.numero_bloque);

            let current = of_group
                .iter()
                .find(|b| {
                    matches!((block_start(b), block_end(b)), (Some(s), Some(e)) if s <= at && at < e)
                })
                .map(|b| (*b).clone());
            let next = of_group
                .iter()
                .find(|b| matches!(block_start(b), Some(s) if s > at))
                .map(|b| (*b).clone());

            let nombre_grupo = of_group
                .first()
                .map(|b| b.nombre_grupo.clone())
                .unwrap_or_default();
            let nombre_area = of_group
                .first()
                .map(|b| b.nombre_area.clone())
                .unwrap_or_default();
            let estado_consulta = match (&current, &next) {
                (Some(_), _) => QueryStatus::EnCurso,
                (None, Some(_)) => QueryStatus::Proximo,
                (None, None) => QueryStatus::NoEncontrado,
            };

            GroupBlocks {
                grupo_id,
                nombre_grupo,
                nombre_area,
                bloque_actual: current,
                bloque_siguiente: next,
                estado_consulta,
            }
        })
        .collect();

    Ok(Json(ApiResponse::ok(BlocksByDateResponse {
        fecha_consulta: query.fecha,
        bloques_por_grupo,
    })))
}

// ==================== Reassignment ====================

fn summarize(block: &ReservationBlock) -> BlockSummary {
    BlockSummary {
        id: block.id,
        grupo_id: block.grupo_id,
        nombre_grupo: block.nombre_grupo.clone(),
        numero_bloque: block.numero_bloque,
        fecha_hora_inicio: block.fecha_hora_inicio.clone(),
        fecha_hora_fin: block.fecha_hora_fin.clone(),
        personas_por_bloque: block.personas_por_bloque,
        es_bloque_cola: block.es_bloque_cola,
        estado: block.estado.clone(),
        empleados_asignados: block.empleados_asignados.len() as u32,
        espacios_disponibles: block.espacios_disponibles,
    }
}

async fn change_employee(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ChangeEmployeeRequest>,
) -> Result<Json<ApiResponse<ChangeEmployeeResponse>>, AppError> {
    authenticate(&state, &headers)?;

    if req.motivo.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "motivo is required",
        ));
    }
    if req.bloque_origen_id == req.bloque_destino_id {
        return Err(AppError::new(ErrorCode::SameBlock));
    }

    let mut plan = state.plan.lock().expect("plan lock poisoned");

    let origin_idx = plan
        .iter()
        .position(|b| b.id == req.bloque_origen_id)
        .ok_or_else(|| {
            AppError::new(ErrorCode::BlockNotFound).with_detail("bloqueId", req.bloque_origen_id)
        })?;
    let dest_idx = plan
        .iter()
        .position(|b| b.id == req.bloque_destino_id)
        .ok_or_else(|| {
            AppError::new(ErrorCode::BlockNotFound).with_detail("bloqueId", req.bloque_destino_id)
        })?;

    let emp_idx = plan[origin_idx]
        .empleados_asignados
        .iter()
        .position(|e| e.empleado_id == Some(req.empleado_id))
        .ok_or_else(|| {
            AppError::new(ErrorCode::EmployeeNotInBlock).with_detail("empleadoId", req.empleado_id)
        })?;

    if !plan[origin_idx].empleados_asignados[emp_idx]
        .estado
        .is_reassignable()
    {
        return Err(AppError::new(ErrorCode::EmployeeNotEligible));
    }
    if plan[dest_idx].espacios_disponibles == 0 {
        return Err(AppError::new(ErrorCode::DestinationBlockFull));
    }
    let now = Local::now().naive_local();
    if matches!(block_start(&plan[dest_idx]), Some(s) if s <= now) {
        return Err(AppError::new(ErrorCode::DestinationBlockStarted));
    }

    let mut employee = plan[origin_idx].empleados_asignados.remove(emp_idx);
    plan[origin_idx].espacios_disponibles += 1;

    let nombre = employee
        .nombre_completo
        .clone()
        .unwrap_or_else(|| "Sin nombre".to_string());
    let nomina = employee.nomina.clone().unwrap_or_else(|| "N/A".to_string());

    employee.posicion_en_bloque = plan[dest_idx].empleados_asignados.len() as u32 + 1;
    plan[dest_idx].empleados_asignados.push(employee);
    plan[dest_idx].espacios_disponibles -= 1;

    let response = ChangeEmployeeResponse {
        empleado_id: req.empleado_id,
        nombre_empleado: nombre,
        nomina_empleado: nomina,
        bloque_origen: summarize(&plan[origin_idx]),
        bloque_destino: summarize(&plan[dest_idx]),
        cambio_exitoso: true,
        fecha_cambio: format_wall_clock(Local::now()),
    };

    tracing::info!(
        empleado_id = req.empleado_id,
        origen = req.bloque_origen_id,
        destino = req.bloque_destino_id,
        motivo = %req.motivo,
        "employee moved between blocks"
    );
    Ok(Json(ApiResponse::ok(response)))
}
