//! User preference state
//!
//! Session-only selections driving the prompt. Single-select groups always
//! hold exactly one value; the interests group is a free toggle set. All of
//! it lives in memory only and resets on restart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

/// Interests offered by the planner form
pub const INTERESTS: &[&str] = &[
    "History",
    "Food",
    "Adventure",
    "Art & Culture",
    "Nature",
    "Nightlife",
    "Shopping",
    "Relaxation",
];

/// Age groups offered by the planner form
pub const AGE_GROUPS: &[&str] = &["18-25", "26-40", "41-60", "60+"];

/// Fallback interests line when nothing is selected
pub const INTERESTS_FALLBACK: &str = "General sightseeing";

/// Budget tier (single-select, exactly one active)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    Budget,
    #[default]
    MidRange,
    Luxury,
}

impl Budget {
    /// All tiers in display order
    pub const ALL: [Budget; 3] = [Budget::Budget, Budget::MidRange, Budget::Luxury];

    /// Display label, as shown on the form control
    pub fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::MidRange => "Mid-Range",
            Self::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Budget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "Budget::from_str: called");
        match s.to_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "mid-range" | "midrange" | "mid" => Ok(Self::MidRange),
            "luxury" => Ok(Self::Luxury),
            _ => Err(format!("Unknown budget: {}. Use: budget, mid-range, or luxury", s)),
        }
    }
}

/// Location-style preference (single-select, exactly one active)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotPreference {
    #[default]
    Popular,
    Lowkey,
}

impl SpotPreference {
    /// Both options in display order
    pub const ALL: [SpotPreference; 2] = [SpotPreference::Popular, SpotPreference::Lowkey];

    /// Display label, also the phrase interpolated into the prompt
    pub fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular Tourist Spots",
            Self::Lowkey => "Lowkey Hangouts",
        }
    }
}

impl std::fmt::Display for SpotPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SpotPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "SpotPreference::from_str: called");
        match s.to_lowercase().as_str() {
            "popular" => Ok(Self::Popular),
            "lowkey" | "low-key" => Ok(Self::Lowkey),
            _ => Err(format!("Unknown spot preference: {}. Use: popular or lowkey", s)),
        }
    }
}

/// Mutable preference state for one session
///
/// Mutated only by explicit toggle actions. Selecting a budget or spot
/// preference replaces the previous value (single-select); toggling an
/// interest flips that interest's membership and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    budget: Budget,
    spot_preference: SpotPreference,
    interests: BTreeSet<String>,
}

impl Preferences {
    /// Session defaults: Mid-Range budget, popular spots, no interests
    pub fn new() -> Self {
        Self::default()
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn spot_preference(&self) -> SpotPreference {
        self.spot_preference
    }

    /// Single-select: recording a tier deactivates the previous one
    pub fn select_budget(&mut self, budget: Budget) {
        debug!(?budget, "Preferences::select_budget: called");
        self.budget = budget;
    }

    /// Single-select: recording a preference deactivates the previous one
    pub fn select_spot_preference(&mut self, spot: SpotPreference) {
        debug!(?spot, "Preferences::select_spot_preference: called");
        self.spot_preference = spot;
    }

    /// Multi-select: flip membership of one interest, leaving the rest alone
    pub fn toggle_interest(&mut self, interest: &str) {
        debug!(%interest, "Preferences::toggle_interest: called");
        if !self.interests.remove(interest) {
            self.interests.insert(interest.to_string());
        }
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.contains(interest)
    }

    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.interests.iter().map(String::as_str)
    }

    pub fn interest_count(&self) -> usize {
        self.interests.len()
    }

    /// Comma-joined interests for the prompt, with the documented fallback
    pub fn interests_line(&self) -> String {
        if self.interests.is_empty() {
            return INTERESTS_FALLBACK.to_string();
        }
        self.interests.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}
