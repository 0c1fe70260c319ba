//! Turno Board - rotation view core
//!
//! The live "Turnos actuales" board: current/next reservation block per
//! work group, seniority-ordered turn lists, a countdown to block expiry,
//! and the employee reassignment workflow for area administrators.
//!
//! Rendering is out of scope; this crate owns the state, the transforms
//! and the protocols, and is driven by whatever frontend hosts it (see
//! `examples/board.rs` for a terminal host).

pub mod capability;
pub mod countdown;
pub mod ports;
pub mod reassign;
pub mod rotation;
pub mod seniority;
pub mod transform;

pub use capability::{Capability, CapabilitySet};
pub use countdown::{Countdown, format_hms};
pub use ports::{BlocksPort, UsersPort};
pub use reassign::{
    ReassignmentWorkflow, SubmitOutcome, WorkflowError, WorkflowState, filter_candidates,
};
pub use rotation::{BoardError, FetchTicket, ReassignTarget, RotationBoard};
pub use seniority::rank_by_seniority;
pub use transform::{BlockView, EmployeeView, NO_BLOCK, WorkGroupView, build_groups};
