//! Block transformer: wire response to board view models
//!
//! All defensive handling of partially malformed server data lives here,
//! in one normalization boundary: a bad employee record degrades to
//! placeholder values instead of breaking the whole board, and a group
//! without a running block still produces a row (with the `no-block`
//! placeholder) so the layout stays stable.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use shared::models::{AssignedEmployee, BlocksByDateResponse, EmployeeStatus, ReservationBlock};

/// Placeholder block id for a group with no running block
pub const NO_BLOCK: &str = "no-block";
/// Placeholder block id for a group with no upcoming block
pub const NO_NEXT_BLOCK: &str = "no-next-block";

/// Employee as displayed inside a block column
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeView {
    pub id: String,
    /// Payroll code (nomina)
    pub codigo: String,
    pub nombre: String,
    pub estado: EmployeeStatus,
    pub fecha_ingreso: String,
    pub antiguedad_anios: f64,
}

/// One block column (current or next) of a group
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub id: String,
    /// Start date, `DD/MM/YYYY`
    pub fecha: String,
    /// End date when it differs from the start date
    pub fecha_fin: Option<String>,
    /// Start time, `HH:MM` local
    pub hora_inicio: String,
    /// End time, `HH:MM` local
    pub hora_fin: String,
    pub empleados: Vec<EmployeeView>,
    /// Block start instant (feeds the reassignment candidate filter)
    pub start_at: Option<DateTime<Local>>,
    /// Block end instant; only computed for the current block, where it
    /// feeds the countdown
    pub end_at: Option<DateTime<Local>>,
    pub numero_bloque: Option<u32>,
}

/// One work group row of the rotation board
#[derive(Debug, Clone, PartialEq)]
pub struct WorkGroupView {
    pub id: String,
    pub nombre: String,
    pub bloque_actual: BlockView,
    pub siguiente_bloque: BlockView,
}

/// Parse an ISO-8601 timestamp into viewer-local time
///
/// Accepts both offset-carrying timestamps and the naive local form the
/// backend usually emits.
pub fn parse_iso_local(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Local.from_local_datetime(&naive).earliest()
}

/// Extract an `HH:MM` local display time, `00:00` when unparsable
fn extract_hour(raw: Option<&str>) -> String {
    raw.and_then(parse_iso_local)
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_else(|| "00:00".to_string())
}

/// Extract a `DD/MM/YYYY` local display date
fn extract_date(raw: Option<&str>) -> Option<String> {
    raw.and_then(parse_iso_local)
        .map(|at| at.format("%d/%m/%Y").to_string())
}

fn today() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

fn tomorrow() -> String {
    (Local::now() + chrono::Duration::days(1))
        .format("%d/%m/%Y")
        .to_string()
}

/// Normalize one raw employee record, applying display fallbacks
fn normalize_employee(raw: &AssignedEmployee) -> EmployeeView {
    EmployeeView {
        id: raw
            .empleado_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        codigo: raw.nomina.clone().unwrap_or_else(|| "N/A".to_string()),
        nombre: raw
            .nombre_completo
            .clone()
            .unwrap_or_else(|| "Sin nombre".to_string()),
        estado: raw.estado,
        fecha_ingreso: raw.fecha_ingreso.clone().unwrap_or_else(|| "N/A".to_string()),
        antiguedad_anios: raw.antiguedad_anios,
    }
}

fn current_block_view(block: Option<&ReservationBlock>) -> BlockView {
    let start = block.map(|b| b.fecha_hora_inicio.as_str());
    let end = block.map(|b| b.fecha_hora_fin.as_str());
    let fecha = extract_date(start).unwrap_or_else(today);

    BlockView {
        id: block
            .map(|b| b.id.to_string())
            .unwrap_or_else(|| NO_BLOCK.to_string()),
        // only shown when the block crosses midnight
        fecha_fin: extract_date(end).filter(|f| *f != fecha),
        fecha,
        hora_inicio: extract_hour(start),
        hora_fin: extract_hour(end),
        empleados: block
            .map(|b| b.empleados_asignados.iter().map(normalize_employee).collect())
            .unwrap_or_default(),
        start_at: start.and_then(parse_iso_local),
        end_at: end.and_then(parse_iso_local),
        numero_bloque: block.map(|b| b.numero_bloque),
    }
}

fn next_block_view(block: Option<&ReservationBlock>) -> BlockView {
    let start = block.map(|b| b.fecha_hora_inicio.as_str());
    let end = block.map(|b| b.fecha_hora_fin.as_str());

    BlockView {
        id: block
            .map(|b| b.id.to_string())
            .unwrap_or_else(|| NO_NEXT_BLOCK.to_string()),
        fecha: extract_date(start).unwrap_or_else(tomorrow),
        fecha_fin: None,
        hora_inicio: extract_hour(start),
        hora_fin: extract_hour(end),
        empleados: block
            .map(|b| b.empleados_asignados.iter().map(normalize_employee).collect())
            .unwrap_or_default(),
        start_at: start.and_then(parse_iso_local),
        // end instant is only needed for the running block's countdown
        end_at: None,
        numero_bloque: block.map(|b| b.numero_bloque),
    }
}

/// Transform the by-date response into board rows, one per group
pub fn build_groups(response: &BlocksByDateResponse) -> Vec<WorkGroupView> {
    response
        .bloques_por_grupo
        .iter()
        .map(|group| WorkGroupView {
            id: group.grupo_id.to_string(),
            nombre: group.nombre_grupo.clone(),
            bloque_actual: current_block_view(group.bloque_actual.as_ref()),
            siguiente_bloque: next_block_view(group.bloque_siguiente.as_ref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{GroupBlocks, QueryStatus};

    fn raw_employee(id: i64, nomina: &str) -> AssignedEmployee {
        AssignedEmployee {
            empleado_id: Some(id),
            nombre_completo: Some(format!("Empleado {}", id)),
            nomina: Some(nomina.to_string()),
            posicion_en_bloque: 1,
            fecha_ingreso: Some("2015-02-10".to_string()),
            antiguedad_anios: 10.0,
            estado: EmployeeStatus::Asignado,
        }
    }

    fn raw_block(id: i64, start: &str, end: &str, employees: Vec<AssignedEmployee>) -> ReservationBlock {
        ReservationBlock {
            id,
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            nombre_area: "Molding".to_string(),
            numero_bloque: 1,
            fecha_hora_inicio: start.to_string(),
            fecha_hora_fin: end.to_string(),
            personas_por_bloque: 4,
            duracion_horas: 8,
            es_bloque_cola: false,
            estado: "Activo".to_string(),
            espacios_disponibles: 2,
            empleados_asignados: employees,
        }
    }

    fn response(groups: Vec<GroupBlocks>) -> BlocksByDateResponse {
        BlocksByDateResponse {
            fecha_consulta: "2025-01-10T10:00:00".to_string(),
            bloques_por_grupo: groups,
        }
    }

    #[test]
    fn test_null_current_block_yields_placeholder_row() {
        let resp = response(vec![GroupBlocks {
            grupo_id: 3,
            nombre_grupo: "Grupo C".to_string(),
            nombre_area: "Paint".to_string(),
            bloque_actual: None,
            bloque_siguiente: None,
            estado_consulta: QueryStatus::NoEncontrado,
        }]);

        let groups = build_groups(&resp);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bloque_actual.id, NO_BLOCK);
        assert!(groups[0].bloque_actual.empleados.is_empty());
        assert_eq!(groups[0].siguiente_bloque.id, NO_NEXT_BLOCK);
        assert!(groups[0].bloque_actual.end_at.is_none());
    }

    #[test]
    fn test_current_block_carries_end_instant() {
        let block = raw_block(
            11,
            "2025-01-10T08:00:00",
            "2025-01-10T16:00:00",
            vec![raw_employee(1, "100")],
        );
        let resp = response(vec![GroupBlocks {
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            nombre_area: "Molding".to_string(),
            bloque_actual: Some(block.clone()),
            bloque_siguiente: Some(block),
            estado_consulta: QueryStatus::EnCurso,
        }]);

        let groups = build_groups(&resp);
        let current = &groups[0].bloque_actual;
        assert_eq!(current.id, "11");
        assert_eq!(current.hora_inicio, "08:00");
        assert_eq!(current.hora_fin, "16:00");
        assert_eq!(current.fecha, "10/01/2025");
        assert!(current.end_at.is_some());
        // only the running block needs an end instant
        assert!(groups[0].siguiente_bloque.end_at.is_none());
    }

    #[test]
    fn test_malformed_employee_degrades_to_placeholders() {
        let bad = AssignedEmployee {
            empleado_id: None,
            nombre_completo: None,
            nomina: None,
            posicion_en_bloque: 0,
            fecha_ingreso: None,
            antiguedad_anios: 0.0,
            estado: EmployeeStatus::Desconocido,
        };
        let block = raw_block(5, "2025-01-10T08:00:00", "2025-01-10T16:00:00", vec![bad]);
        let resp = response(vec![GroupBlocks {
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            nombre_area: "Molding".to_string(),
            bloque_actual: Some(block),
            bloque_siguiente: None,
            estado_consulta: QueryStatus::EnCurso,
        }]);

        let groups = build_groups(&resp);
        let emp = &groups[0].bloque_actual.empleados[0];
        assert_eq!(emp.id, "unknown");
        assert_eq!(emp.codigo, "N/A");
        assert_eq!(emp.nombre, "Sin nombre");
        assert_eq!(emp.fecha_ingreso, "N/A");
        assert_eq!(emp.antiguedad_anios, 0.0);
    }

    #[test]
    fn test_unparsable_timestamps_fall_back() {
        let block = raw_block(9, "not-a-date", "also-bad", vec![]);
        let resp = response(vec![GroupBlocks {
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            nombre_area: "Molding".to_string(),
            bloque_actual: Some(block),
            bloque_siguiente: None,
            estado_consulta: QueryStatus::EnCurso,
        }]);

        let groups = build_groups(&resp);
        let current = &groups[0].bloque_actual;
        assert_eq!(current.hora_inicio, "00:00");
        assert_eq!(current.hora_fin, "00:00");
        assert!(current.end_at.is_none());
        // falls back to today's date rather than erroring
        assert_eq!(current.fecha, today());
    }

    #[test]
    fn test_offset_timestamps_accepted() {
        assert!(parse_iso_local("2025-01-10T08:00:00Z").is_some());
        assert!(parse_iso_local("2025-01-10T08:00:00-06:00").is_some());
        assert!(parse_iso_local("2025-01-10T08:00:00.123").is_some());
    }
}
