//! Terminal front end
//!
//! The interactive planner: a form on the left, the generated itinerary on
//! the right, About and Setup as separate views. Split the teacher-tested
//! way: `events` polls the terminal, `state` is pure data, `app` handles
//! keys, `views` draws, `runner` owns the terminal and the event loop.

mod app;
mod events;
mod runner;
pub mod state;
mod views;

use std::io::{self, Stdout};

use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub use app::App;
pub use runner::run;

/// Static view content, embedded at build time
pub mod content {
    /// About view text, also printed by `vg about`
    pub const ABOUT: &str = include_str!("about.md");
    /// Credential setup guidance
    pub const SETUP: &str = include_str!("setup.md");
}

/// Terminal type used by the TUI
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Put the terminal into raw alternate-screen mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore the terminal to its normal state
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
