//! Reservation block models (Bloques de Reservación)

use serde::{Deserialize, Serialize};

/// Assignment status of an employee inside a block
///
/// Wire values are the Spanish strings used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Turn assigned, not yet taken
    Asignado,
    /// Employee reserved their vacation days in this turn
    Reservado,
    /// Turn completed
    Completado,
    /// Moved to another block
    Transferido,
    /// Did not respond before the block deadline
    NoRespondio,
    /// Unrecognized status from the server
    #[serde(other)]
    Desconocido,
}

impl EmployeeStatus {
    /// Whether the employee may still be skipped/reassigned out of the
    /// current block. Completed and reserved turns are settled.
    pub fn is_reassignable(&self) -> bool {
        !matches!(self, Self::Completado | Self::Reservado)
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Desconocido
    }
}

/// Employee record as assigned to a reservation block
///
/// Fields the backend occasionally omits are optional; consumers apply
/// display fallbacks at the normalization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedEmployee {
    pub empleado_id: Option<i64>,
    pub nombre_completo: Option<String>,
    /// Payroll code (numeric string)
    pub nomina: Option<String>,
    /// Turn order position inside the block
    #[serde(default)]
    pub posicion_en_bloque: u32,
    /// Hire date (ISO 8601 date)
    pub fecha_ingreso: Option<String>,
    /// Seniority in years
    #[serde(default)]
    pub antiguedad_anios: f64,
    #[serde(default)]
    pub estado: EmployeeStatus,
}

/// A reservation block: a fixed time window with a capped number of
/// scheduled employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBlock {
    pub id: i64,
    pub grupo_id: i64,
    pub nombre_grupo: String,
    pub nombre_area: String,
    /// Sequence number inside the group's plan
    pub numero_bloque: u32,
    /// Block start (ISO 8601)
    pub fecha_hora_inicio: String,
    /// Block end (ISO 8601)
    pub fecha_hora_fin: String,
    /// Fixed employee capacity
    pub personas_por_bloque: u32,
    pub duracion_horas: u32,
    /// Queue block for employees who did not respond in their regular turn
    #[serde(default)]
    pub es_bloque_cola: bool,
    pub estado: String,
    pub espacios_disponibles: u32,
    #[serde(default)]
    pub empleados_asignados: Vec<AssignedEmployee>,
}

/// Response for block listing queries (by group or by employee)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksResponse {
    pub total_bloques: u32,
    pub bloques: Vec<ReservationBlock>,
}

/// Query status for a group at the requested instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    /// A block is currently running
    EnCurso,
    /// Next block exists but none is running
    Proximo,
    /// No block found at or after the requested instant
    NoEncontrado,
}

/// Current and next block for one work group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBlocks {
    pub grupo_id: i64,
    pub nombre_grupo: String,
    pub nombre_area: String,
    pub bloque_actual: Option<ReservationBlock>,
    pub bloque_siguiente: Option<ReservationBlock>,
    pub estado_consulta: QueryStatus,
}

/// Response for the by-date rotation query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocksByDateResponse {
    /// The instant the query was evaluated at (local wall clock)
    pub fecha_consulta: String,
    pub bloques_por_grupo: Vec<GroupBlocks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::NoRespondio).unwrap(),
            "\"NoRespondio\""
        );
        let parsed: EmployeeStatus = serde_json::from_str("\"Reservado\"").unwrap();
        assert_eq!(parsed, EmployeeStatus::Reservado);
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let parsed: EmployeeStatus = serde_json::from_str("\"Vacaciones\"").unwrap();
        assert_eq!(parsed, EmployeeStatus::Desconocido);
    }

    #[test]
    fn test_reassignable() {
        assert!(EmployeeStatus::Asignado.is_reassignable());
        assert!(EmployeeStatus::NoRespondio.is_reassignable());
        assert!(!EmployeeStatus::Completado.is_reassignable());
        assert!(!EmployeeStatus::Reservado.is_reassignable());
    }

    #[test]
    fn test_partial_employee_record() {
        // Backend sometimes sends bare records; missing fields must not
        // fail deserialization.
        let emp: AssignedEmployee = serde_json::from_str(r#"{"empleadoId": 9}"#).unwrap();
        assert_eq!(emp.empleado_id, Some(9));
        assert!(emp.nomina.is_none());
        assert_eq!(emp.estado, EmployeeStatus::Desconocido);
    }

    #[test]
    fn test_group_blocks_with_null_current() {
        let json = r#"{
            "grupoId": 3,
            "nombreGrupo": "Grupo A",
            "nombreArea": "Molding",
            "bloqueActual": null,
            "bloqueSiguiente": null,
            "estadoConsulta": "NoEncontrado"
        }"#;
        let group: GroupBlocks = serde_json::from_str(json).unwrap();
        assert!(group.bloque_actual.is_none());
        assert_eq!(group.estado_consulta, QueryStatus::NoEncontrado);
    }
}
