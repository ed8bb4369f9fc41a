//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::app::App;
use super::event::{handle_event, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Short timeout so debounced results appear without a keypress
        if let Some(event) = poll_event(Duration::from_millis(50))? {
            if handle_event(app, event) == HandleResult::Quit {
                app.should_quit = true;
            }
        }

        app.drain_navigations();

        if app.should_quit {
            tracing::debug!("TUI quit requested");
            break;
        }
    }

    Ok(())
}
