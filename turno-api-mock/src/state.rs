//! Seeded in-memory state for the mock API

use chrono::{DateTime, Duration, Local};
use shared::models::{
    AssignedEmployee, EmployeeStatus, ReservationBlock, RoleName, UserAreaWithGroups, UserDetail,
    UserGroup, UserStatus,
};
use shared::util::format_wall_clock;
use std::sync::Mutex;

/// A login-capable seeded account
pub struct MockUser {
    pub password: String,
    pub detail: UserDetail,
}

/// Shared server state
///
/// The block plan is mutable so `cambiar-empleado` actually moves people;
/// everything else is fixed at startup.
pub struct AppState {
    pub jwt_secret: String,
    pub anio_objetivo: i32,
    pub users: Vec<MockUser>,
    pub plan: Mutex<Vec<ReservationBlock>>,
}

impl AppState {
    /// Build the default seed: one area with two groups, a rotation plan
    /// anchored around the current wall clock so one block is always
    /// running.
    pub fn seeded() -> Self {
        let now = Local::now();
        let mut plan = Vec::new();
        plan.extend(group_plan(10, "Grupo A", now));
        plan.extend(group_plan(11, "Grupo B", now + Duration::hours(2)));

        Self {
            jwt_secret: "turno-mock-secret".to_string(),
            anio_objetivo: now.format("%Y").to_string().parse().unwrap_or(2025),
            users: seed_users(),
            plan: Mutex::new(plan),
        }
    }

    pub fn find_user(&self, username: &str) -> Option<&MockUser> {
        self.users.iter().find(|u| u.detail.username == username)
    }

    pub fn user_by_id(&self, id: i64) -> Option<UserDetail> {
        self.users
            .iter()
            .find(|u| u.detail.id == id)
            .map(|u| u.detail.clone())
    }
}

fn group_plan(grupo_id: i64, nombre: &str, anchor: DateTime<Local>) -> Vec<ReservationBlock> {
    // four 8-hour blocks: one finished, one running, one full, one open
    let windows = [
        (-12, EmployeeStatus::Completado, 0u32),
        (-4, EmployeeStatus::Asignado, 1),
        (4, EmployeeStatus::Asignado, 0),
        (12, EmployeeStatus::Asignado, 2),
    ];

    windows
        .iter()
        .enumerate()
        .map(|(i, (offset_hours, estado, espacios))| {
            let start = anchor + Duration::hours(*offset_hours);
            let end = start + Duration::hours(8);
            let numero = (i + 1) as u32;
            let empleados = if numero == 2 {
                running_block_roster(grupo_id, *estado)
            } else {
                Vec::new()
            };
            ReservationBlock {
                id: grupo_id * 100 + numero as i64,
                grupo_id,
                nombre_grupo: nombre.to_string(),
                nombre_area: "Molding".to_string(),
                numero_bloque: numero,
                fecha_hora_inicio: format_wall_clock(start),
                fecha_hora_fin: format_wall_clock(end),
                personas_por_bloque: 4,
                duracion_horas: 8,
                es_bloque_cola: numero == 4,
                estado: "Activo".to_string(),
                espacios_disponibles: *espacios,
                empleados_asignados: empleados,
            }
        })
        .collect()
}

fn running_block_roster(grupo_id: i64, first_estado: EmployeeStatus) -> Vec<AssignedEmployee> {
    let base = grupo_id * 10;
    vec![
        AssignedEmployee {
            empleado_id: Some(base + 1),
            nombre_completo: Some("María Torres".to_string()),
            nomina: Some("87".to_string()),
            posicion_en_bloque: 1,
            fecha_ingreso: Some("2012-01-15".to_string()),
            antiguedad_anios: 13.0,
            estado: first_estado,
        },
        AssignedEmployee {
            empleado_id: Some(base + 2),
            nombre_completo: Some("Luis Hernández".to_string()),
            nomina: Some("900".to_string()),
            posicion_en_bloque: 2,
            fecha_ingreso: Some("2012-01-15".to_string()),
            antiguedad_anios: 13.0,
            estado: EmployeeStatus::Reservado,
        },
        AssignedEmployee {
            empleado_id: Some(base + 3),
            nombre_completo: Some("Ana Ruiz".to_string()),
            nomina: Some("1044".to_string()),
            posicion_en_bloque: 3,
            fecha_ingreso: Some("2018-03-01".to_string()),
            antiguedad_anios: 7.0,
            estado: EmployeeStatus::Asignado,
        },
    ]
}

fn seed_users() -> Vec<MockUser> {
    let molding = UserAreaWithGroups {
        area_id: 1,
        nombre_general: "Molding".to_string(),
        grupos: vec![
            UserGroup {
                grupo_id: 10,
                rol: "Rol A".to_string(),
            },
            UserGroup {
                grupo_id: 11,
                rol: "Rol B".to_string(),
            },
        ],
    };

    vec![
        MockUser {
            password: "password".to_string(),
            detail: UserDetail {
                id: 1,
                username: "jefa.molding".to_string(),
                full_name: "Gabriela Santos".to_string(),
                status: UserStatus::Activo,
                areas: vec![molding.clone()],
                roles: vec![RoleName::AreaAdmin],
                fecha_ingreso: Some("2008-06-01".to_string()),
            },
        },
        MockUser {
            password: "password".to_string(),
            detail: UserDetail {
                id: 2,
                username: "lider.a".to_string(),
                full_name: "Pedro Díaz".to_string(),
                status: UserStatus::Activo,
                areas: vec![molding],
                roles: vec![RoleName::GroupLeader],
                fecha_ingreso: Some("2014-09-20".to_string()),
            },
        },
    ]
}
