//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events. It does
//! no rendering (that is the views module) and no IO: anything that touches
//! the network or the filesystem becomes a [`PendingAction`] for the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::domain::{Budget, INTERESTS, SpotPreference};
use crate::state::Page;

use super::state::{AppState, Focus, PendingAction};

/// TUI application
#[derive(Debug)]
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(state: AppState) -> Self {
        debug!("App::new: called");
        Self { state }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        if self.state.show_help {
            // Any key closes the overlay
            self.state.show_help = false;
            return false;
        }

        match self.state.session.page() {
            Page::Home => self.handle_home_key(key),
            Page::About | Page::Setup => self.handle_static_key(key),
        }
    }

    /// Keys on the About and Setup views
    fn handle_static_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_static_key: called");
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.state.session.toggle_page(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') | KeyCode::F(1) => self.state.show_help = true,
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    /// Keys on the planner view
    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.state.session.toggle_page();
                return false;
            }
            KeyCode::F(1) => {
                self.state.show_help = true;
                return false;
            }
            KeyCode::Up => {
                self.state.focus_prev();
                return false;
            }
            KeyCode::Down => {
                self.state.focus_next();
                return false;
            }
            KeyCode::Enter => {
                self.activate();
                return false;
            }
            KeyCode::Esc => {
                self.state.flash = None;
                return false;
            }
            _ => {}
        }

        // Text fields swallow everything else that types
        if self.state.focus.is_text() {
            self.handle_text_key(key);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('?') => self.state.show_help = true,
            KeyCode::Char('e') => self.request_export(),
            KeyCode::Char('r') => self.request_generate(),
            KeyCode::Left => self.select_prev(),
            KeyCode::Right => self.select_next(),
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('k') if self.state.focus == Focus::Result => self.select_section_prev(),
            KeyCode::Char('j') if self.state.focus == Focus::Result => self.select_section_next(),
            _ => {}
        }
        false
    }

    /// Typed input into the focused text field
    fn handle_text_key(&mut self, key: KeyEvent) {
        let buffer = match self.state.focus {
            Focus::Destination => &mut self.state.destination,
            Focus::Duration => &mut self.state.duration,
            Focus::Vibe => &mut self.state.vibe,
            _ => return,
        };

        match key.code {
            KeyCode::Char(c) => {
                // The duration field only takes digits
                if self.state.focus == Focus::Duration && !c.is_ascii_digit() {
                    return;
                }
                buffer.push(c);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            _ => {}
        }
    }

    /// Enter on the focused control
    fn activate(&mut self) {
        debug!(focus = ?self.state.focus, "App::activate: called");
        match self.state.focus {
            Focus::Generate => self.request_generate(),
            Focus::Interests => self.toggle_current(),
            Focus::Result => self.toggle_current(),
            // Enter moves on from input fields
            _ => self.state.focus_next(),
        }
    }

    /// Submit (or retry): refused synchronously while a request is in flight
    fn request_generate(&mut self) {
        if self.state.session.is_busy() {
            debug!("App::request_generate: busy, ignoring");
            return;
        }
        debug!("App::request_generate: queueing");
        self.state.pending = Some(PendingAction::Generate);
    }

    /// Export: needs a rendered itinerary and an idle export control
    fn request_export(&mut self) {
        if self.state.exporting || !self.state.result.is_ready() {
            debug!("App::request_export: not exportable, ignoring");
            return;
        }
        self.state.pending = Some(PendingAction::Export);
    }

    /// Flip the theme now; persistence is the runner's job
    fn toggle_theme(&mut self) {
        let theme = self.state.session.toggle_theme();
        self.state.pending = Some(PendingAction::PersistTheme(theme));
    }

    /// Left arrow on the focused control
    fn select_prev(&mut self) {
        match self.state.focus {
            Focus::AgeGroup => self.state.cycle_age_group(false),
            Focus::Budget => self.cycle_budget(false),
            Focus::Spots => self.toggle_spots(),
            Focus::Interests => self.state.move_interest_cursor(false),
            Focus::Result => self.select_section_prev(),
            _ => {}
        }
    }

    /// Right arrow on the focused control
    fn select_next(&mut self) {
        match self.state.focus {
            Focus::AgeGroup => self.state.cycle_age_group(true),
            Focus::Budget => self.cycle_budget(true),
            Focus::Spots => self.toggle_spots(),
            Focus::Interests => self.state.move_interest_cursor(true),
            Focus::Result => self.select_section_next(),
            _ => {}
        }
    }

    /// Single-select: move the active budget tier
    fn cycle_budget(&mut self, forward: bool) {
        let current = self.state.session.preferences.budget();
        let idx = Budget::ALL.iter().position(|b| *b == current).unwrap_or(0);
        let len = Budget::ALL.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        self.state.session.preferences.select_budget(Budget::ALL[next]);
    }

    /// Single-select with two options: either arrow flips it
    fn toggle_spots(&mut self) {
        let next = match self.state.session.preferences.spot_preference() {
            SpotPreference::Popular => SpotPreference::Lowkey,
            SpotPreference::Lowkey => SpotPreference::Popular,
        };
        self.state.session.preferences.select_spot_preference(next);
    }

    /// Space or Enter on the focused toggle
    fn toggle_current(&mut self) {
        match self.state.focus {
            Focus::Interests => {
                let interest = INTERESTS[self.state.interest_idx.min(INTERESTS.len() - 1)];
                self.state.session.preferences.toggle_interest(interest);
            }
            Focus::Result => {
                let idx = self.state.selected_section;
                if let Some(view) = self.state.result.view_mut() {
                    view.toggle_section(idx);
                }
            }
            _ => {}
        }
    }

    fn select_section_prev(&mut self) {
        self.state.selected_section = self.state.selected_section.saturating_sub(1);
    }

    fn select_section_next(&mut self) {
        let max = self.state.section_count().saturating_sub(1);
        self.state.selected_section = (self.state.selected_section + 1).min(max);
    }
}
