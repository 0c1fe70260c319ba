//! User / role models

use serde::{Deserialize, Serialize};

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum UserStatus {
    Desactivado = 0,
    Activo = 1,
    Suspendido = 2,
}

impl From<UserStatus> for u8 {
    fn from(status: UserStatus) -> Self {
        status as u8
    }
}

impl TryFrom<u8> for UserStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Desactivado),
            1 => Ok(Self::Activo),
            2 => Ok(Self::Suspendido),
            other => Err(format!("invalid user status: {}", other)),
        }
    }
}

/// Role names as issued by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "SuperUsuario")]
    SuperUser,
    #[serde(rename = "Administrador")]
    Admin,
    /// Area administrator (Jefe de Área) - the only role allowed to
    /// skip/reassign turns
    #[serde(rename = "Jefe De Area")]
    AreaAdmin,
    #[serde(rename = "Lider De Grupo")]
    GroupLeader,
    #[serde(rename = "Ingeniero Industrial")]
    IndustrialEngineer,
    #[serde(rename = "Delegado Sindical")]
    UnionRepresentative,
    #[serde(rename = "Empleado Sindicalizado")]
    Unionized,
    /// Unrecognized role from the server; grants no capabilities
    #[serde(other)]
    Unknown,
}

/// Group membership
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub grupo_id: i64,
    /// Display role/name of the group (e.g. "Rol A")
    pub rol: String,
}

/// Area with its groups, as returned by the user-detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAreaWithGroups {
    pub area_id: i64,
    pub nombre_general: String,
    #[serde(default)]
    pub grupos: Vec<UserGroup>,
}

/// User detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub status: UserStatus,
    /// Permitted areas with their groups
    #[serde(default)]
    pub areas: Vec<UserAreaWithGroups>,
    #[serde(default)]
    pub roles: Vec<RoleName>,
    /// Hire date (ISO 8601 date)
    pub fecha_ingreso: Option<String>,
}
