//! Employee reassignment workflow
//!
//! Dialog-shaped state machine for moving an employee from the running
//! block to a later one. Candidate destinations are the group's blocks
//! that start strictly after the origin block; the reason is mandatory.
//! A failed submission keeps every selection so the administrator can
//! correct and retry.

use crate::ports::BlocksPort;
use crate::transform::parse_iso_local;
use shared::models::{ChangeEmployeeRequest, ChangeEmployeeResponse, ReservationBlock};
use std::sync::Arc;
use thiserror::Error;

/// Where the workflow currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// No reassignment in progress
    Idle,
    /// Fetching candidate destination blocks
    CandidatesLoading,
    /// Candidates ready, collecting destination/reason
    CandidatesReady,
    /// Change request in flight
    Submitting,
    /// Change confirmed by the server
    Success,
    /// Change rejected or failed; selections are preserved
    Failed(String),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no reassignment in progress")]
    NotOpen,
    #[error("destination block not selected")]
    NoDestination,
    #[error("a reason is required")]
    ReasonRequired,
    #[error("workflow is busy")]
    Busy,
}

/// Result of a submission attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Server confirmed the change; the board should refetch
    Confirmed(Box<ChangeEmployeeResponse>),
    /// Rejected locally before any request was sent
    Invalid(WorkflowError),
    /// Server rejected or the request failed; input preserved
    Rejected(String),
}

/// Keep only blocks that start strictly after the origin block
///
/// The origin itself (and anything sharing its id) is never a candidate,
/// even when timestamps are unparsable.
pub fn filter_candidates(
    origin_id: i64,
    origin_start: &str,
    blocks: &[ReservationBlock],
) -> Vec<ReservationBlock> {
    let Some(origin_at) = parse_iso_local(origin_start) else {
        return Vec::new();
    };
    blocks
        .iter()
        .filter(|b| b.id != origin_id)
        .filter(|b| {
            parse_iso_local(&b.fecha_hora_inicio)
                .map(|at| at > origin_at)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// One reassignment attempt, from opening the dialog to confirmation
pub struct ReassignmentWorkflow {
    blocks: Arc<dyn BlocksPort>,
    state: WorkflowState,
    empleado_id: i64,
    origin_block_id: i64,
    origin_start: String,
    candidates: Vec<ReservationBlock>,
    destination_id: Option<i64>,
    reason: String,
    notes: String,
}

impl ReassignmentWorkflow {
    pub fn new(blocks: Arc<dyn BlocksPort>) -> Self {
        Self {
            blocks,
            state: WorkflowState::Idle,
            empleado_id: 0,
            origin_block_id: 0,
            origin_start: String::new(),
            candidates: Vec::new(),
            destination_id: None,
            reason: String::new(),
            notes: String::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn candidates(&self) -> &[ReservationBlock] {
        &self.candidates
    }

    pub fn destination_id(&self) -> Option<i64> {
        self.destination_id
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Open the dialog for one employee and load candidate destinations
    ///
    /// Clears any previous attempt. On fetch failure the state is
    /// [`WorkflowState::Failed`] and the dialog stays open.
    pub async fn open(
        &mut self,
        empleado_id: i64,
        origin: &ReservationBlock,
        anio_objetivo: i32,
    ) {
        self.empleado_id = empleado_id;
        self.origin_block_id = origin.id;
        self.origin_start = origin.fecha_hora_inicio.clone();
        self.candidates.clear();
        self.destination_id = None;
        self.reason.clear();
        self.notes.clear();
        self.state = WorkflowState::CandidatesLoading;

        match self.blocks.blocks_by_group(anio_objetivo, origin.grupo_id).await {
            Ok(response) => {
                self.candidates =
                    filter_candidates(origin.id, &self.origin_start, &response.bloques);
                self.state = WorkflowState::CandidatesReady;
            }
            Err(err) => {
                tracing::warn!(grupo_id = origin.grupo_id, error = %err, "candidate fetch failed");
                self.state = WorkflowState::Failed(err.to_string());
            }
        }
    }

    /// Pick a destination among the loaded candidates
    ///
    /// Ids not present in the candidate list are ignored.
    pub fn select_destination(&mut self, block_id: i64) {
        if self.candidates.iter().any(|b| b.id == block_id) {
            self.destination_id = Some(block_id);
        }
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Validate and submit the change
    ///
    /// Local validation failures never touch the network. A server
    /// rejection (including an HTTP 200 carrying `cambioExitoso: false`)
    /// moves to [`WorkflowState::Failed`] with all input intact.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.state {
            WorkflowState::CandidatesReady | WorkflowState::Failed(_) => {}
            WorkflowState::Submitting | WorkflowState::CandidatesLoading => {
                return SubmitOutcome::Invalid(WorkflowError::Busy);
            }
            _ => return SubmitOutcome::Invalid(WorkflowError::NotOpen),
        }

        let Some(destination_id) = self.destination_id else {
            return SubmitOutcome::Invalid(WorkflowError::NoDestination);
        };
        let reason = self.reason.trim();
        if reason.is_empty() {
            return SubmitOutcome::Invalid(WorkflowError::ReasonRequired);
        }
        let notes = self.notes.trim();

        let request = ChangeEmployeeRequest {
            empleado_id: self.empleado_id,
            bloque_origen_id: self.origin_block_id,
            bloque_destino_id: destination_id,
            motivo: reason.to_string(),
            observaciones_adicionales: (!notes.is_empty()).then(|| notes.to_string()),
        };

        self.state = WorkflowState::Submitting;
        match self.blocks.change_employee(&request).await {
            Ok(confirmation) => {
                tracing::info!(
                    empleado_id = self.empleado_id,
                    bloque_destino_id = destination_id,
                    "employee reassigned"
                );
                self.state = WorkflowState::Success;
                SubmitOutcome::Confirmed(Box::new(confirmation))
            }
            Err(err) => {
                let message = err.to_string();
                self.state = WorkflowState::Failed(message.clone());
                SubmitOutcome::Rejected(message)
            }
        }
    }

    /// Close the dialog, discarding the attempt
    pub fn close(&mut self) {
        self.state = WorkflowState::Idle;
        self.candidates.clear();
        self.destination_id = None;
        self.reason.clear();
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::models::{
        BlockSummary, BlocksByDateResponse, BlocksResponse, ChangeEmployeeRequest,
    };
    use std::sync::Mutex;
    use turno_client::{BlockFilter, ClientError, ClientResult};

    fn block(id: i64, start: &str) -> ReservationBlock {
        ReservationBlock {
            id,
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            nombre_area: "Molding".to_string(),
            numero_bloque: id as u32,
            fecha_hora_inicio: start.to_string(),
            fecha_hora_fin: start.to_string(),
            personas_por_bloque: 4,
            duracion_horas: 8,
            es_bloque_cola: false,
            estado: "Activo".to_string(),
            espacios_disponibles: 2,
            empleados_asignados: vec![],
        }
    }

    fn summary(id: i64) -> BlockSummary {
        BlockSummary {
            id,
            grupo_id: 1,
            nombre_grupo: "Grupo A".to_string(),
            numero_bloque: 1,
            fecha_hora_inicio: "2025-01-15T08:00:00".to_string(),
            fecha_hora_fin: "2025-01-15T16:00:00".to_string(),
            personas_por_bloque: 4,
            es_bloque_cola: false,
            estado: "Activo".to_string(),
            empleados_asignados: 3,
            espacios_disponibles: 1,
        }
    }

    struct FakeBlocks {
        group_blocks: Vec<ReservationBlock>,
        reject_change: Option<String>,
        change_calls: Mutex<Vec<ChangeEmployeeRequest>>,
    }

    impl FakeBlocks {
        fn new(group_blocks: Vec<ReservationBlock>) -> Self {
            Self {
                group_blocks,
                reject_change: None,
                change_calls: Mutex::new(Vec::new()),
            }
        }

        fn rejecting(mut self, message: &str) -> Self {
            self.reject_change = Some(message.to_string());
            self
        }

        fn change_call_count(&self) -> usize {
            self.change_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BlocksPort for FakeBlocks {
        async fn blocks_by_date(
            &self,
            _fecha: &str,
            _filter: BlockFilter,
            _anio_objetivo: i32,
        ) -> ClientResult<BlocksByDateResponse> {
            unimplemented!("not used by the workflow")
        }

        async fn blocks_by_group(
            &self,
            _anio_objetivo: i32,
            _grupo_id: i64,
        ) -> ClientResult<BlocksResponse> {
            Ok(BlocksResponse {
                total_bloques: self.group_blocks.len() as u32,
                bloques: self.group_blocks.clone(),
            })
        }

        async fn change_employee(
            &self,
            request: &ChangeEmployeeRequest,
        ) -> ClientResult<ChangeEmployeeResponse> {
            self.change_calls.lock().unwrap().push(request.clone());
            if let Some(message) = &self.reject_change {
                return Err(ClientError::InvalidResponse(message.clone()));
            }
            Ok(ChangeEmployeeResponse {
                empleado_id: request.empleado_id,
                nombre_empleado: "Empleado".to_string(),
                nomina_empleado: "100".to_string(),
                bloque_origen: summary(request.bloque_origen_id),
                bloque_destino: summary(request.bloque_destino_id),
                cambio_exitoso: true,
                fecha_cambio: "2025-01-10T12:00:00".to_string(),
            })
        }
    }

    #[test]
    fn test_candidates_start_strictly_after_origin() {
        let blocks = vec![
            block(1, "2025-01-05T08:00:00"),
            block(2, "2025-01-10T08:00:00"),
            block(3, "2025-01-15T08:00:00"),
        ];
        // origin is block 2; block 1 is earlier, block 2 is itself
        let candidates = filter_candidates(2, "2025-01-10T08:00:00", &blocks);
        let ids: Vec<i64> = candidates.iter().map(|b| b.id).collect();
        assert_eq!(ids, [3]);
    }

    #[test]
    fn test_same_start_different_id_is_not_a_candidate() {
        let blocks = vec![block(7, "2025-01-10T08:00:00")];
        let candidates = filter_candidates(2, "2025-01-10T08:00:00", &blocks);
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_open_loads_filtered_candidates() {
        let fake = Arc::new(FakeBlocks::new(vec![
            block(1, "2025-01-05T08:00:00"),
            block(2, "2025-01-10T08:00:00"),
            block(3, "2025-01-15T08:00:00"),
        ]));
        let mut workflow = ReassignmentWorkflow::new(fake);
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;

        assert_eq!(*workflow.state(), WorkflowState::CandidatesReady);
        assert_eq!(workflow.candidates().len(), 1);
        assert_eq!(workflow.candidates()[0].id, 3);
    }

    #[tokio::test]
    async fn test_submit_requires_reason_without_network_call() {
        let fake = Arc::new(FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")]));
        let mut workflow = ReassignmentWorkflow::new(fake.clone());
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;
        workflow.select_destination(3);
        workflow.set_reason("   ");

        let outcome = workflow.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Invalid(WorkflowError::ReasonRequired)
        ));
        assert_eq!(fake.change_call_count(), 0);
        assert_eq!(*workflow.state(), WorkflowState::CandidatesReady);
    }

    #[tokio::test]
    async fn test_submit_requires_destination() {
        let fake = Arc::new(FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")]));
        let mut workflow = ReassignmentWorkflow::new(fake.clone());
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;
        workflow.set_reason("Incapacidad");

        let outcome = workflow.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Invalid(WorkflowError::NoDestination)
        ));
        assert_eq!(fake.change_call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_submit_sends_trimmed_fields() {
        let fake = Arc::new(FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")]));
        let mut workflow = ReassignmentWorkflow::new(fake.clone());
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;
        workflow.select_destination(3);
        workflow.set_reason("  Incapacidad médica  ");
        workflow.set_notes("   ");

        let outcome = workflow.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Confirmed(_)));
        assert_eq!(*workflow.state(), WorkflowState::Success);

        let calls = fake.change_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].motivo, "Incapacidad médica");
        // blank notes are dropped, not sent as whitespace
        assert!(calls[0].observaciones_adicionales.is_none());
    }

    #[tokio::test]
    async fn test_failed_submit_preserves_input_and_allows_retry() {
        let fake = Arc::new(
            FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")])
                .rejecting("el bloque destino está lleno"),
        );
        let mut workflow = ReassignmentWorkflow::new(fake.clone());
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;
        workflow.select_destination(3);
        workflow.set_reason("Incapacidad");

        let outcome = workflow.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert!(matches!(workflow.state(), WorkflowState::Failed(_)));
        // input survives for the retry
        assert_eq!(workflow.destination_id(), Some(3));
        assert_eq!(workflow.reason(), "Incapacidad");

        // retry goes back to the network
        let _ = workflow.submit().await;
        assert_eq!(fake.change_call_count(), 2);
    }

    #[tokio::test]
    async fn test_select_destination_ignores_unknown_id() {
        let fake = Arc::new(FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")]));
        let mut workflow = ReassignmentWorkflow::new(fake);
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;

        workflow.select_destination(99);
        assert_eq!(workflow.destination_id(), None);
    }

    #[tokio::test]
    async fn test_close_resets_to_idle() {
        let fake = Arc::new(FakeBlocks::new(vec![block(3, "2025-01-15T08:00:00")]));
        let mut workflow = ReassignmentWorkflow::new(fake);
        workflow.open(42, &block(2, "2025-01-10T08:00:00"), 2025).await;
        workflow.set_reason("x");
        workflow.close();

        assert_eq!(*workflow.state(), WorkflowState::Idle);
        assert!(workflow.candidates().is_empty());
        assert_eq!(workflow.reason(), "");
    }
}
