//! Domain types for Voyage
//!
//! The itinerary wire format the model produces, the in-memory preference
//! state the form mutates, and the trip request that ties them together.

mod itinerary;
mod preferences;
mod request;

pub use itinerary::{Accommodation, DayPlan, Itinerary, Meals};
pub use preferences::{AGE_GROUPS, Budget, INTERESTS, Preferences, SpotPreference};
pub use request::TripRequest;
