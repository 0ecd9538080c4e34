//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. The session
//! (preferences, theme, page, busy flag) lives inside, the rest is form
//! buffers and display state.

use prefstore::Theme;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::domain::{AGE_GROUPS, INTERESTS, TripRequest};
use crate::render::ItineraryView;
use crate::state::Session;

/// Rotating loader captions
pub const LOADING_WORDS: &[&str] = &[
    "Crafting",
    "Charting",
    "Curating",
    "Mapping",
    "Scouting",
    "Packing",
    "Plotting",
    "Sketching",
];

/// Form controls in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Destination,
    Duration,
    AgeGroup,
    Vibe,
    Budget,
    Spots,
    Interests,
    Generate,
    /// The rendered itinerary, reachable once one exists
    Result,
}

impl Focus {
    /// Focus ring, top to bottom
    pub const ORDER: [Focus; 9] = [
        Focus::Destination,
        Focus::Duration,
        Focus::AgeGroup,
        Focus::Vibe,
        Focus::Budget,
        Focus::Spots,
        Focus::Interests,
        Focus::Generate,
        Focus::Result,
    ];

    /// True for controls that capture typed characters
    pub fn is_text(self) -> bool {
        matches!(self, Focus::Destination | Focus::Duration | Focus::Vibe)
    }
}

/// Action the key handler asks the runner to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Submit the form (or retry after an error)
    Generate,
    /// Export the rendered itinerary to a document
    Export,
    /// Write the toggled theme to the preference store
    PersistTheme(Theme),
}

/// What the result area shows
#[derive(Debug, Default)]
pub enum ResultState {
    /// Nothing generated yet
    #[default]
    Empty,
    /// Request in flight
    Loading { word: &'static str },
    /// Inline failure message with a retry affordance
    Error(String),
    /// A rendered itinerary
    Ready(ItineraryView),
}

impl ResultState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn view(&self) -> Option<&ItineraryView> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut ItineraryView> {
        match self {
            Self::Ready(view) => Some(view),
            _ => None,
        }
    }
}

/// Full TUI state
#[derive(Debug)]
pub struct AppState {
    /// Preferences, theme, page, busy flag
    pub session: Session,
    pub focus: Focus,

    // Form buffers
    pub destination: String,
    pub duration: String,
    pub vibe: String,
    pub age_group_idx: usize,
    /// Cursor within the interests chip row
    pub interest_idx: usize,

    // Result area
    pub result: ResultState,
    pub selected_section: usize,

    /// Export control disabled while a capture is running
    pub exporting: bool,
    /// One-line status under the result (export outcome)
    pub flash: Option<String>,

    pub show_help: bool,
    pub should_quit: bool,
    /// Action for the runner to pick up after key handling
    pub pending: Option<PendingAction>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        debug!("AppState::new: called");
        Self {
            session,
            focus: Focus::default(),
            destination: String::new(),
            duration: "3".to_string(),
            vibe: String::new(),
            age_group_idx: 1,
            interest_idx: 0,
            result: ResultState::Empty,
            selected_section: 0,
            exporting: false,
            flash: None,
            show_help: false,
            should_quit: false,
            pending: None,
        }
    }

    /// Pick a loader caption
    pub fn loading_word() -> &'static str {
        LOADING_WORDS.choose(&mut rand::rng()).copied().unwrap_or("Crafting")
    }

    /// Swap the result area to the loading indicator
    pub fn begin_loading(&mut self) {
        self.result = ResultState::Loading {
            word: Self::loading_word(),
        };
        self.flash = None;
    }

    /// Assemble the trip request from the form buffers
    pub fn trip_request(&self) -> TripRequest {
        TripRequest {
            destination: self.destination.clone(),
            duration_days: self.duration.clone(),
            age_group: AGE_GROUPS[self.age_group_idx.min(AGE_GROUPS.len() - 1)].to_string(),
            trip_vibe: self.vibe.clone(),
            preferences: self.session.preferences.clone(),
        }
    }

    /// Number of day sections in the current result
    pub fn section_count(&self) -> usize {
        self.result.view().map(|v| v.sections.len()).unwrap_or(0)
    }

    /// Move focus down the ring, skipping Result while there is none
    pub fn focus_next(&mut self) {
        let order = Self::focus_ring(self.result.is_ready());
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
        debug!(?self.focus, "AppState::focus_next: moved");
    }

    /// Move focus up the ring, skipping Result while there is none
    pub fn focus_prev(&mut self) {
        let order = Self::focus_ring(self.result.is_ready());
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + order.len() - 1) % order.len()];
        debug!(?self.focus, "AppState::focus_prev: moved");
    }

    fn focus_ring(has_result: bool) -> &'static [Focus] {
        static ORDER: [Focus; 9] = Focus::ORDER;
        if has_result {
            &ORDER
        } else {
            &ORDER[..ORDER.len() - 1]
        }
    }

    /// Cycle the age-group select
    pub fn cycle_age_group(&mut self, forward: bool) {
        let len = AGE_GROUPS.len();
        self.age_group_idx = if forward {
            (self.age_group_idx + 1) % len
        } else {
            (self.age_group_idx + len - 1) % len
        };
    }

    /// Move the interests cursor
    pub fn move_interest_cursor(&mut self, forward: bool) {
        let len = INTERESTS.len();
        self.interest_idx = if forward {
            (self.interest_idx + 1) % len
        } else {
            (self.interest_idx + len - 1) % len
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Session::new(Theme::Light, false))
    }

    #[test]
    fn test_defaults() {
        let state = state();
        assert_eq!(state.focus, Focus::Destination);
        assert_eq!(state.duration, "3");
        assert!(matches!(state.result, ResultState::Empty));
        assert!(!state.exporting);
    }

    #[test]
    fn test_focus_skips_result_until_ready() {
        let mut state = state();
        for _ in 0..Focus::ORDER.len() {
            state.focus_next();
            assert_ne!(state.focus, Focus::Result);
        }
    }

    #[test]
    fn test_focus_reaches_result_when_ready() {
        let mut state = state();
        state.result = ResultState::Ready(ItineraryView::from_itinerary(&crate::domain::Itinerary::default()));

        state.focus = Focus::Generate;
        state.focus_next();
        assert_eq!(state.focus, Focus::Result);
    }

    #[test]
    fn test_trip_request_carries_form_values() {
        let mut state = state();
        state.destination = "Kyoto".to_string();
        state.vibe = "relaxed".to_string();
        state.session.preferences.toggle_interest("Food");

        let request = state.trip_request();
        assert_eq!(request.destination, "Kyoto");
        assert_eq!(request.duration_days, "3");
        assert_eq!(request.age_group, "26-40");
        assert!(request.preferences.has_interest("Food"));
    }

    #[test]
    fn test_cycle_age_group_wraps() {
        let mut state = state();
        state.age_group_idx = AGE_GROUPS.len() - 1;
        state.cycle_age_group(true);
        assert_eq!(state.age_group_idx, 0);
        state.cycle_age_group(false);
        assert_eq!(state.age_group_idx, AGE_GROUPS.len() - 1);
    }
}
