//! Terminal host for the rotation board
//!
//! Connects to a running API (`TURNO_API`, default http://127.0.0.1:8080),
//! signs in and renders the current/next block per work group with a live
//! countdown. Keys: `r` refresh, `q` quit.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use std::sync::Arc;
use std::time::Duration;
use turno_board::{Countdown, RotationBoard, rank_by_seniority};
use turno_client::{BlocksApi, ClientConfig, Session, UsersApi};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let base_url = std::env::var("TURNO_API").unwrap_or_else(|_| "http://127.0.0.1:8080".into());
    let username = std::env::var("TURNO_USER").unwrap_or_else(|_| "jefa.molding".into());
    let password = std::env::var("TURNO_PASS").unwrap_or_else(|_| "password".into());

    let config = ClientConfig::new(&base_url);
    let session = Arc::new(Session::new(&config));
    let user = session.login(&username, &password).await?;
    let http = config.build_http_client().with_token_source(session.clone());

    let mut board = RotationBoard::new(
        Arc::new(BlocksApi::new(http.clone())),
        Arc::new(UsersApi::new(http)),
        chrono::Local::now().format("%Y").to_string().parse()?,
    );
    board.load_user(user.id).await?;
    board.refresh().await;

    let mut countdown = Countdown::new();
    countdown.set_target(board.countdown_target());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &mut board, &mut countdown).await;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    board: &mut RotationBoard,
    countdown: &mut Countdown,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, board, &countdown.remaining()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => {
                        board.refresh().await;
                        countdown.set_target(board.countdown_target());
                    }
                    _ => {}
                }
            }
        }
    }
}

fn draw(frame: &mut ratatui::Frame, board: &RotationBoard, remaining: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(frame.area());

    let header = Paragraph::new(Line::from(format!(
        "Turnos actuales · {} · termina en {}",
        board
            .active_group()
            .map(|g| g.nombre.as_str())
            .unwrap_or("sin bloque activo"),
        remaining
    )))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL).title("Rotación"));
    frame.render_widget(header, chunks[0]);

    let mut rows = Vec::new();
    for group in board.groups() {
        let current = &group.bloque_actual;
        let turnos = rank_by_seniority(&current.empleados)
            .iter()
            .map(|e| format!("{} ({})", e.nombre, e.codigo))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(Row::new(vec![
            group.nombre.clone(),
            format!("{} {}–{}", current.fecha, current.hora_inicio, current.hora_fin),
            format!(
                "{} {}–{}",
                group.siguiente_bloque.fecha,
                group.siguiente_bloque.hora_inicio,
                group.siguiente_bloque.hora_fin
            ),
            turnos,
        ]));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(24),
            Constraint::Length(24),
            Constraint::Min(20),
        ],
    )
    .header(
        Row::new(vec!["Grupo", "Bloque actual", "Siguiente", "Turnos"])
            .style(Style::default().fg(Color::Cyan)),
    )
    .block(Block::default().borders(Borders::ALL).title("Grupos"));
    frame.render_widget(table, chunks[1]);

    if let Some(error) = board.error() {
        let msg = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(msg, chunks[0]);
    }
}
