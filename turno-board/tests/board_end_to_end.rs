//! Board against the real client and the in-process mock API

use std::sync::Arc;
use turno_board::{Capability, ReassignmentWorkflow, RotationBoard, SubmitOutcome, WorkflowState};
use turno_client::{BlocksApi, ClientConfig, Session, UsersApi};
use turno_api_mock::{AppState, router};

async fn spawn_mock() -> String {
    let state = Arc::new(AppState::seeded());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router(state))
            .await
            .expect("mock server");
    });
    format!("http://{}", addr)
}

fn this_year() -> i32 {
    chrono::Local::now()
        .format("%Y")
        .to_string()
        .parse()
        .unwrap()
}

async fn admin_board(base: &str) -> (RotationBoard, Arc<dyn turno_board::BlocksPort>) {
    let config = ClientConfig::new(base);
    let session = Arc::new(Session::new(&config));
    let user = session
        .login("jefa.molding", "password")
        .await
        .expect("seeded login");
    let http = config.build_http_client().with_token_source(session);

    let blocks: Arc<dyn turno_board::BlocksPort> = Arc::new(BlocksApi::new(http.clone()));
    let users: Arc<dyn turno_board::UsersPort> = Arc::new(UsersApi::new(http));

    let mut board = RotationBoard::new(blocks.clone(), users, this_year());
    board.load_user(user.id).await.expect("user detail");
    (board, blocks)
}

#[tokio::test]
async fn test_board_loads_rotation_with_countdown_target() {
    let base = spawn_mock().await;
    let (mut board, _blocks) = admin_board(&base).await;

    assert_eq!(board.selected_area(), Some(1));
    assert_eq!(board.selected_group(), Some(10));
    assert!(board.capabilities().allows(Capability::SkipTurn));

    assert!(board.refresh().await);
    assert!(board.error().is_none());
    assert_eq!(board.groups().len(), 1);

    let active = board.active_group().expect("running block");
    assert_eq!(active.id, "10");
    assert_eq!(active.bloque_actual.empleados.len(), 3);
    // the running block ends in the future, so the countdown has a target
    let target = board.countdown_target().expect("countdown target");
    assert!(target > chrono::Local::now());
}

#[tokio::test]
async fn test_area_selection_shows_both_groups() {
    let base = spawn_mock().await;
    let (mut board, _blocks) = admin_board(&base).await;

    board.set_group(None);
    assert!(board.refresh().await);
    assert_eq!(board.groups().len(), 2);
}

#[tokio::test]
async fn test_skip_then_reassign_through_the_mock() {
    let base = spawn_mock().await;
    let (mut board, blocks) = admin_board(&base).await;
    board.refresh().await;

    // employee 103 is assigned in the running block of group 10
    let target = board.handle_skip(10, 103).expect("skip allowed");
    assert_eq!(target.origin.id, 1002);

    board.on_reassignment_opened();
    let mut workflow = ReassignmentWorkflow::new(blocks);
    workflow.open(target.empleado_id, &target.origin, this_year()).await;
    assert_eq!(*workflow.state(), WorkflowState::CandidatesReady);

    // candidates are the blocks starting after the running one; the full
    // block is still listed, the server is the capacity authority
    let ids: Vec<i64> = workflow.candidates().iter().map(|b| b.id).collect();
    assert_eq!(ids, [1003, 1004]);

    workflow.select_destination(1004);
    workflow.set_reason("Incapacidad médica");
    let outcome = workflow.submit().await;
    let confirmation = match outcome {
        SubmitOutcome::Confirmed(c) => c,
        other => panic!("expected confirmation, got {:?}", other),
    };
    assert_eq!(confirmation.bloque_destino.id, 1004);

    workflow.close();
    assert!(board.on_reassignment_closed().await);
    // the board reflects the move after the post-dialog refetch
    let active = board.active_group().expect("running block");
    assert_eq!(active.bloque_actual.empleados.len(), 2);
}

#[tokio::test]
async fn test_full_destination_keeps_workflow_input() {
    let base = spawn_mock().await;
    let (mut board, blocks) = admin_board(&base).await;
    board.refresh().await;

    let target = board.handle_skip(10, 103).expect("skip allowed");
    let mut workflow = ReassignmentWorkflow::new(blocks);
    workflow.open(target.empleado_id, &target.origin, this_year()).await;

    // block 1003 is seeded full; the server must reject the move
    workflow.select_destination(1003);
    workflow.set_reason("Cambio de turno");
    let outcome = workflow.submit().await;
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(matches!(workflow.state(), WorkflowState::Failed(_)));
    assert_eq!(workflow.destination_id(), Some(1003));
    assert_eq!(workflow.reason(), "Cambio de turno");
}

#[tokio::test]
async fn test_reserved_turn_cannot_be_skipped() {
    let base = spawn_mock().await;
    let (mut board, _blocks) = admin_board(&base).await;
    board.refresh().await;

    let err = board.handle_skip(10, 102).unwrap_err();
    assert!(matches!(err, turno_board::BoardError::NotReassignable(102)));
}
