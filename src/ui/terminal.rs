//! Ownership of the real terminal.
//!
//! While the dashboard is interactive the terminal is in raw mode on the
//! alternate screen. [`TerminalControl::suspend`] undoes both and drops the
//! drawing surface so a child process gets an ordinary terminal;
//! [`TerminalControl::resume`] sets everything up again from scratch.

use crate::ui::{render, App};
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::{debug, error};

/// Something the dashboard can draw on and temporarily give away.
pub trait TerminalControl {
    fn draw(&mut self, app: &App) -> Result<()>;
    /// Release the terminal to a child process.
    fn suspend(&mut self) -> Result<()>;
    /// Take the terminal back after the child exited.
    fn resume(&mut self) -> Result<()>;
}

/// The crossterm-backed terminal used by the binary.
pub struct CrosstermTerminal {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl CrosstermTerminal {
    /// Enter raw mode and the alternate screen.
    pub fn enter() -> Result<Self> {
        Ok(Self {
            terminal: Some(setup_terminal()?),
        })
    }

    /// Leave raw mode and the alternate screen. Safe to call twice.
    pub fn restore(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            cleanup_terminal(&mut terminal)?;
        }
        Ok(())
    }
}

impl TerminalControl for CrosstermTerminal {
    fn draw(&mut self, app: &App) -> Result<()> {
        let terminal = self
            .terminal
            .as_mut()
            .context("Cannot draw while the terminal is handed off")?;
        terminal
            .draw(|f| render(f, app))
            .context("Failed to draw terminal UI")?;
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.restore()?;
        debug!("terminal released");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.terminal.is_none() {
            self.terminal = Some(setup_terminal()?);
            debug!("terminal reacquired");
        }
        Ok(())
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            error!("Failed to restore terminal: {e:#}");
        }
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    undo_on_error(enter_alternate_screen, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Run `step`; if it fails, run `undo` before returning the error.
fn undo_on_error<T>(step: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    let result = step();
    if result.is_err() {
        undo();
    }
    result
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// Make sure a panic never leaves the terminal in raw mode.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        original_hook(panic_info);
    }));
}
