//! Employee reassignment between blocks (cambiar-empleado)

use serde::{Deserialize, Serialize};

/// Request to move an employee from one block to another
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmployeeRequest {
    pub empleado_id: i64,
    pub bloque_origen_id: i64,
    pub bloque_destino_id: i64,
    /// Mandatory reason for the move
    pub motivo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones_adicionales: Option<String>,
}

/// Compact block summary returned with a change confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub id: i64,
    pub grupo_id: i64,
    pub nombre_grupo: String,
    pub numero_bloque: u32,
    pub fecha_hora_inicio: String,
    pub fecha_hora_fin: String,
    pub personas_por_bloque: u32,
    #[serde(default)]
    pub es_bloque_cola: bool,
    pub estado: String,
    /// Headcount after the change
    pub empleados_asignados: u32,
    pub espacios_disponibles: u32,
}

/// Confirmation of an employee move
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmployeeResponse {
    pub empleado_id: i64,
    pub nombre_empleado: String,
    pub nomina_empleado: String,
    pub bloque_origen: BlockSummary,
    pub bloque_destino: BlockSummary,
    pub cambio_exitoso: bool,
    /// When the change was applied (ISO 8601)
    pub fecha_cambio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = ChangeEmployeeRequest {
            empleado_id: 12,
            bloque_origen_id: 5,
            bloque_destino_id: 8,
            motivo: "Incapacidad médica".to_string(),
            observaciones_adicionales: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["empleadoId"], 12);
        assert_eq!(json["bloqueOrigenId"], 5);
        assert_eq!(json["bloqueDestinoId"], 8);
        assert_eq!(json["motivo"], "Incapacidad médica");
        // optional notes are omitted, not null
        assert!(json.get("observacionesAdicionales").is_none());
    }
}
