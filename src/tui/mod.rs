//! Terminal user interface for the dbsuggest demo.
//!
//! Provides the main application loop using ratatui and crossterm. Each
//! iteration draws the UI, waits for an event (or a tick) on a blocking
//! worker thread, then gives the suggestion component a chance to fire
//! its pending fetch.

pub mod app;
mod events;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::error::{Result, SuggestError};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Instant;

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        let event_handler = EventHandler::new();

        Ok(Self {
            terminal,
            event_handler,
        })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| SuggestError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| SuggestError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| SuggestError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| SuggestError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| SuggestError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| SuggestError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop until the user quits.
    pub async fn run(&mut self, app: &mut App) -> Result<()> {
        // Set up panic hook to restore terminal on panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let result = self.run_event_loop(app).await;

        // Restore panic hook
        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(&mut self, app: &mut App) -> Result<()> {
        while app.running {
            // Draw the UI. The viewport is recorded so mouse hit testing
            // works against the same geometry that was rendered.
            self.terminal
                .draw(|frame| {
                    app.set_viewport(frame.area());
                    ui::render(frame, app);
                })
                .map_err(|e| SuggestError::internal(format!("Failed to draw: {e}")))?;

            // Wait for input on a blocking worker thread so the async
            // runtime stays responsive. A tick arrives at least every
            // 100ms, which keeps the debounce timer polled.
            let handler = self.event_handler.clone();
            let event = tokio::task::spawn_blocking(move || handler.next())
                .await
                .map_err(|e| SuggestError::internal(format!("Event task failed: {e}")))??;

            app.handle_event(event, Instant::now());
            app.poll_suggestions(Instant::now()).await;
        }

        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application until the user quits.
pub async fn run(mut app: App) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.run(&mut app).await
}
