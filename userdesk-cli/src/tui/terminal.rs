//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Short poll so completions show up promptly
const TICK: Duration = Duration::from_millis(50);

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI until the user quits
pub async fn run(mut app: App) -> Result<()> {
    let mut terminal = init_terminal()?;

    app.list.mount();
    info!(endpoint = %app.endpoint, "tui started");

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    let aborted = app.list.unmount();
    if aborted > 0 {
        debug!(aborted, "dropped pending requests on exit");
    }
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        if app.list.poll() > 0 {
            app.clamp_selection();
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Blocking poll on the runtime thread; request tasks run on the workers
        if let Some(Event::Key(key)) = poll_event(TICK)? {
            if handle_key(app, key) == HandleResult::Quit {
                return Ok(());
            }
        }

        tokio::task::yield_now().await;
    }
}
