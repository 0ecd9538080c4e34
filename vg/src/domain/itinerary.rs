//! Itinerary wire types
//!
//! These mirror the JSON document the model is asked to produce. Decoding is
//! deliberately lenient: the source is a non-deterministic external model, so
//! every field carries a default, meal and accommodation details are optional,
//! and the renderer substitutes placeholders for anything missing. An
//! itinerary is immutable once received; a new generation fully replaces it.

use serde::{Deserialize, Serialize};

/// The full structured trip plan returned by the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Itinerary {
    /// Destination as echoed back by the model, e.g. "Tokyo, Japan"
    pub destination_name: String,

    /// Creative title for the trip
    pub trip_title: String,

    /// Two-to-three sentence summary of the overall plan
    pub summary: String,

    /// One entry per day, in day order
    pub daily_plans: Vec<DayPlan>,
}

/// One day's entry within an itinerary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayPlan {
    /// Day number starting at 1 (produced by the model, not validated here)
    pub day: u32,

    /// Short title for the day's theme
    pub title: String,

    /// 2-4 activities expected
    pub activities: Vec<String>,

    /// Breakfast, lunch, and dinner suggestions
    pub food: Option<Meals>,

    /// Hotel suggestion fitting the budget
    pub accommodation: Option<Accommodation>,
}

/// Meal suggestions for one day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meals {
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
}

/// A single accommodation suggestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Accommodation {
    /// Name of the suggested hotel
    pub name: Option<String>,

    /// Kind of accommodation, e.g. "Boutique Hotel"
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
