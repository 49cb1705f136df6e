//! taskline-tui: Terminal UI for the taskline orchestrator client
//!
//! This crate provides the TUI layer for taskline, including:
//! - The conversation pane (message history + goal input)
//! - The agent timeline pane
//! - The event loop wiring one background request at a time

mod app;
mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, InputOutcome, Pane};
pub use event::{key_to_action, Action, Event, EventHandler};
pub use taskline_client;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use tokio::task::JoinHandle;

use taskline_client::{ClientError, Config, RunAck};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// This is the main entry point for the TUI. It sets up the terminal,
/// runs the event loop, and restores the terminal on exit.
pub async fn run_tui(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);

    // Create event handler (5 Hz tick rate = 200ms)
    let mut events = EventHandler::new(200);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    // The single in-flight request, if any
    let mut pending: Option<JoinHandle<Result<RunAck, ClientError>>> = None;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Check for a completed request (non-blocking)
        if pending.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = pending.take() {
                match handle.await {
                    Ok(outcome) => app.controller.resolve(outcome),
                    Err(e) => app
                        .controller
                        .resolve(Err(ClientError::Interrupted(e.to_string()))),
                }
                app.drain_notices();
            }
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => match app.handle_input_key(key) {
                    InputOutcome::Submitted(goal) => {
                        // Exactly one outbound call per accepted submission
                        let client = app.controller.client().clone();
                        pending =
                            Some(tokio::spawn(async move { client.run_goal(&goal).await }));
                    }
                    InputOutcome::Handled => {}
                    InputOutcome::NotHandled => app.handle_action(key_to_action(key)),
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.handle_action(Action::Up),
                    MouseEventKind::ScrollDown => app.handle_action(Action::Down),
                    _ => {}
                },
                Event::Tick => app.tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            if let Some(handle) = pending.take() {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
