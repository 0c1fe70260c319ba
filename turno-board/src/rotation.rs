//! Rotation board orchestrator
//!
//! Owns the board state: the signed-in user, the area/group selection,
//! the fetched group rows and the error/loading flags. Fetches are
//! split into a ticket handshake (`begin_fetch` / `apply_fetch`) so a
//! response that arrives after the selection changed is discarded
//! instead of overwriting the newer view.

use crate::capability::{Capability, CapabilitySet};
use crate::ports::{BlocksPort, UsersPort};
use crate::transform::{WorkGroupView, build_groups};
use chrono::{DateTime, Local};
use shared::models::{BlocksByDateResponse, ReservationBlock, UserDetail};
use shared::util::wall_clock_now;
use std::sync::Arc;
use thiserror::Error;
use turno_client::{BlockFilter, ClientResult};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("no user loaded")]
    NoUser,
    #[error("operation not permitted for this user")]
    NotPermitted,
    #[error("no block is currently running")]
    NoActiveBlock,
    #[error("employee {0} is not in the running block")]
    EmployeeNotFound(i64),
    #[error("employee {0} can no longer be reassigned")]
    NotReassignable(i64),
}

/// Token tying one in-flight fetch to the selection it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

/// A skip request resolved against the raw server data
///
/// Carries what the reassignment workflow needs to open.
#[derive(Debug, Clone)]
pub struct ReassignTarget {
    pub empleado_id: i64,
    pub origin: ReservationBlock,
}

pub struct RotationBoard {
    blocks: Arc<dyn BlocksPort>,
    users: Arc<dyn UsersPort>,
    /// Scheduling year the rotation plan belongs to
    anio_objetivo: i32,
    user: Option<UserDetail>,
    capabilities: CapabilitySet,
    selected_area: Option<i64>,
    selected_group: Option<i64>,
    /// Group selection to restore when the reassignment dialog closes
    original_group: Option<i64>,
    groups: Vec<WorkGroupView>,
    /// Raw rows behind `groups`, kept for skip/reassign resolution
    raw: Option<BlocksByDateResponse>,
    loading: bool,
    error: Option<String>,
    /// Bumped on every selection change; stale fetches carry an old value
    seq: u64,
}

impl RotationBoard {
    pub fn new(blocks: Arc<dyn BlocksPort>, users: Arc<dyn UsersPort>, anio_objetivo: i32) -> Self {
        Self {
            blocks,
            users,
            anio_objetivo,
            user: None,
            capabilities: CapabilitySet::default(),
            selected_area: None,
            selected_group: None,
            original_group: None,
            groups: Vec::new(),
            raw: None,
            loading: false,
            error: None,
            seq: 0,
        }
    }

    pub fn groups(&self) -> &[WorkGroupView] {
        &self.groups
    }

    pub fn selected_area(&self) -> Option<i64> {
        self.selected_area
    }

    pub fn selected_group(&self) -> Option<i64> {
        self.selected_group
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn user(&self) -> Option<&UserDetail> {
        self.user.as_ref()
    }

    /// Load the signed-in user and default the selection to their first
    /// area and its first group
    pub async fn load_user(&mut self, user_id: i64) -> ClientResult<()> {
        let user = self.users.user_by_id(user_id).await?;
        self.capabilities = CapabilitySet::for_user(&user);
        self.selected_area = user.areas.first().map(|a| a.area_id);
        self.selected_group = user
            .areas
            .first()
            .and_then(|a| a.grupos.first())
            .map(|g| g.grupo_id);
        tracing::debug!(
            user_id,
            area = ?self.selected_area,
            grupo = ?self.selected_group,
            "user loaded"
        );
        self.user = Some(user);
        self.bump();
        Ok(())
    }

    /// Select an area, defaulting the group to the area's first group
    pub fn set_area(&mut self, area_id: i64) {
        self.selected_area = Some(area_id);
        self.selected_group = self.user.as_ref().and_then(|u| {
            u.areas
                .iter()
                .find(|a| a.area_id == area_id)
                .and_then(|a| a.grupos.first())
                .map(|g| g.grupo_id)
        });
        self.bump();
    }

    /// Select a specific group; `None` widens back to the whole area
    pub fn set_group(&mut self, group_id: Option<i64>) {
        self.selected_group = group_id;
        self.bump();
    }

    fn bump(&mut self) {
        self.seq += 1;
    }

    /// Start a fetch for the current selection
    ///
    /// The returned ticket must be handed back to [`apply_fetch`]; a
    /// ticket issued before a later selection change no longer applies.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.error = None;
        FetchTicket { seq: self.seq }
    }

    /// Apply a completed fetch, discarding it when stale
    ///
    /// Returns whether the result was applied.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ClientResult<BlocksByDateResponse>,
    ) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(ticket = ticket.seq, current = self.seq, "stale fetch discarded");
            return false;
        }
        self.loading = false;
        match result {
            Ok(response) => {
                self.groups = build_groups(&response);
                self.raw = Some(response);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "rotation fetch failed");
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Fetch the rotation for the current selection at the local wall
    /// clock instant
    pub async fn refresh(&mut self) -> bool {
        let filter = match (self.selected_group, self.selected_area) {
            (Some(grupo_id), _) => BlockFilter::Group(grupo_id),
            (None, Some(area_id)) => BlockFilter::Area(area_id),
            (None, None) => {
                self.error = Some(BoardError::NoUser.to_string());
                return false;
            }
        };
        let ticket = self.begin_fetch();
        let fecha = wall_clock_now();
        let result = self
            .blocks
            .blocks_by_date(&fecha, filter, self.anio_objetivo)
            .await;
        self.apply_fetch(ticket, result)
    }

    /// First group whose running block has assigned employees
    ///
    /// Server-returned order decides ties; in practice the plan keeps a
    /// single group rotating at a time.
    pub fn active_group(&self) -> Option<&WorkGroupView> {
        self.groups
            .iter()
            .find(|g| !g.bloque_actual.empleados.is_empty())
    }

    /// End instant of the active group's running block, for the countdown
    pub fn countdown_target(&self) -> Option<DateTime<Local>> {
        self.active_group().and_then(|g| g.bloque_actual.end_at)
    }

    /// Resolve a skip request for an employee in a group's running block
    ///
    /// Requires the skip capability; reserved and completed turns are
    /// refused before any dialog opens.
    pub fn handle_skip(&self, grupo_id: i64, empleado_id: i64) -> Result<ReassignTarget, BoardError> {
        if !self.capabilities.allows(Capability::SkipTurn) {
            return Err(BoardError::NotPermitted);
        }
        let origin = self
            .raw
            .as_ref()
            .and_then(|r| {
                r.bloques_por_grupo
                    .iter()
                    .find(|g| g.grupo_id == grupo_id)
                    .and_then(|g| g.bloque_actual.as_ref())
            })
            .ok_or(BoardError::NoActiveBlock)?;
        let employee = origin
            .empleados_asignados
            .iter()
            .find(|e| e.empleado_id == Some(empleado_id))
            .ok_or(BoardError::EmployeeNotFound(empleado_id))?;
        if !employee.estado.is_reassignable() {
            return Err(BoardError::NotReassignable(empleado_id));
        }
        Ok(ReassignTarget {
            empleado_id,
            origin: origin.clone(),
        })
    }

    /// Remember the selection before the reassignment dialog takes over
    pub fn on_reassignment_opened(&mut self) {
        self.original_group = self.selected_group;
    }

    /// Restore the selection after the dialog closes and refetch once
    pub async fn on_reassignment_closed(&mut self) -> bool {
        if let Some(original) = self.original_group.take() {
            if self.selected_group != Some(original) {
                self.selected_group = Some(original);
                self.bump();
            }
        }
        self.refresh().await
    }

    pub fn anio_objetivo(&self) -> i32 {
        self.anio_objetivo
    }
}
