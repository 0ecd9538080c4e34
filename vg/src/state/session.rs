//! Session state and the single-flight guard
//!
//! One struct owns the mutable application state the original kept in
//! ambient globals: preferences, theme, the current page, and the busy flag
//! that makes generation single-flight. Every mutation is a method so the
//! invariants hold at the call site.

use prefstore::Theme;
use tracing::debug;

use crate::domain::Preferences;

/// Addressable views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// The planner form and result area
    #[default]
    Home,
    /// Informational view, reachable even without a credential
    About,
    /// Credential setup guidance, shown instead of Home when unconfigured
    Setup,
}

/// Mutable state for one application run
#[derive(Debug, Clone)]
pub struct Session {
    /// Budget, spot preference, and interests
    pub preferences: Preferences,
    theme: Theme,
    page: Page,
    /// When set, Home is replaced by the setup guidance
    setup_mode: bool,
    /// True while a generation request is in flight
    busy: bool,
}

impl Session {
    /// Start a session with the persisted theme
    ///
    /// With `setup_mode` the main view is the setup guidance; About stays
    /// reachable either way.
    pub fn new(theme: Theme, setup_mode: bool) -> Self {
        debug!(%theme, %setup_mode, "Session::new: called");
        Self {
            preferences: Preferences::new(),
            theme,
            page: if setup_mode { Page::Setup } else { Page::Home },
            setup_mode,
            busy: false,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn setup_mode(&self) -> bool {
        self.setup_mode
    }

    /// Fragment-style navigation: flip between the main view and About
    /// without a reload
    pub fn toggle_page(&mut self) {
        let main = if self.setup_mode { Page::Setup } else { Page::Home };
        self.page = if self.page == Page::About { main } else { Page::About };
        debug!(?self.page, "Session::toggle_page: switched");
    }

    /// Jump straight to About (the deep link)
    pub fn open_about(&mut self) {
        debug!("Session::open_about: called");
        self.page = Page::About;
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and return the new value for persistence
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!(theme = %self.theme, "Session::toggle_theme: switched");
        self.theme
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the single in-flight slot
    ///
    /// Set synchronously before the request suspends. Returns false when a
    /// request is already outstanding; the caller must then do nothing.
    pub fn try_begin_generation(&mut self) -> bool {
        if self.busy {
            debug!("Session::try_begin_generation: already busy, refusing");
            return false;
        }
        self.busy = true;
        debug!("Session::try_begin_generation: claimed");
        true
    }

    /// Release the slot
    ///
    /// Called exactly once per settled request, success or failure, so the
    /// flag can never stick.
    pub fn finish_generation(&mut self) {
        debug!("Session::finish_generation: called");
        self.busy = false;
    }
}
