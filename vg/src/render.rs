//! Itinerary view-model
//!
//! Presentation-independent rendering contract: the pipeline produces an
//! [`ItineraryView`], the TUI draws it, the exporter paginates it. Sections
//! start collapsed and toggle independently of each other; there is no
//! accordion exclusivity. The view owns the itinerary's display state for
//! one cycle; a new generation replaces the whole view.

use tracing::debug;

use crate::domain::{DayPlan, Itinerary};

/// Placeholder for meal or accommodation details the model left out
pub const NOT_SPECIFIED: &str = "Not specified";

/// Meal row labels, fixed order
pub const MEAL_LABELS: [&str; 3] = ["Breakfast", "Lunch", "Dinner"];

/// Rendered itinerary, one display cycle's worth of state
#[derive(Debug, Clone)]
pub struct ItineraryView {
    pub destination_name: String,
    pub trip_title: String,
    pub summary: String,
    pub sections: Vec<DaySection>,
}

/// One collapsible day section
#[derive(Debug, Clone)]
pub struct DaySection {
    pub day: u32,
    pub title: String,
    pub activities: Vec<String>,
    /// Three fixed rows matching [`MEAL_LABELS`]
    pub meals: [String; 3],
    /// Single name-and-type line
    pub accommodation: String,
    /// Collapsed on arrival; toggled by the header
    pub expanded: bool,
}

impl DaySection {
    fn from_plan(plan: &DayPlan) -> Self {
        let meals = match &plan.food {
            Some(food) => [
                or_not_specified(&food.breakfast),
                or_not_specified(&food.lunch),
                or_not_specified(&food.dinner),
            ],
            None => [
                NOT_SPECIFIED.to_string(),
                NOT_SPECIFIED.to_string(),
                NOT_SPECIFIED.to_string(),
            ],
        };

        let accommodation = match &plan.accommodation {
            Some(acc) => format!(
                "{} ({})",
                acc.name.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(NOT_SPECIFIED),
                acc.kind.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(NOT_SPECIFIED),
            ),
            None => NOT_SPECIFIED.to_string(),
        };

        Self {
            day: plan.day,
            title: plan.title.clone(),
            activities: plan.activities.clone(),
            meals,
            accommodation,
            expanded: false,
        }
    }

    /// Header line, e.g. "Day 1: Historic Heart of the City"
    pub fn header(&self) -> String {
        format!("Day {}: {}", self.day, self.title)
    }
}

impl ItineraryView {
    /// Build the view for a freshly parsed itinerary
    ///
    /// Every section starts collapsed.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        debug!(days = itinerary.daily_plans.len(), "ItineraryView::from_itinerary: called");
        Self {
            destination_name: itinerary.destination_name.clone(),
            trip_title: itinerary.trip_title.clone(),
            summary: itinerary.summary.clone(),
            sections: itinerary.daily_plans.iter().map(DaySection::from_plan).collect(),
        }
    }

    /// Flip one section's expansion; other sections are untouched
    ///
    /// Out-of-range indexes are ignored.
    pub fn toggle_section(&mut self, index: usize) {
        debug!(%index, "ItineraryView::toggle_section: called");
        if let Some(section) = self.sections.get_mut(index) {
            section.expanded = !section.expanded;
        }
    }

    /// Snapshot of every section's expansion state, in order
    pub fn expanded_states(&self) -> Vec<bool> {
        self.sections.iter().map(|s| s.expanded).collect()
    }

    /// Restore expansion states captured with [`Self::expanded_states`]
    pub fn set_expanded_states(&mut self, states: &[bool]) {
        for (section, state) in self.sections.iter_mut().zip(states) {
            section.expanded = *state;
        }
    }

    /// Force every section open (used by the exporter's capture step)
    pub fn expand_all(&mut self) {
        for section in &mut self.sections {
            section.expanded = true;
        }
    }
}

/// Placeholder substitution for the lenient decode policy
fn or_not_specified(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_SPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Accommodation, Meals};

    fn sample_itinerary() -> Itinerary {
        Itinerary {
            destination_name: "Kyoto".to_string(),
            trip_title: "Temples and Tea".to_string(),
            summary: "Three slow days.".to_string(),
            daily_plans: vec![
                DayPlan {
                    day: 1,
                    title: "Arrival".to_string(),
                    activities: vec!["Fushimi Inari".to_string(), "Gion walk".to_string()],
                    food: Some(Meals {
                        breakfast: Some("B".to_string()),
                        lunch: None,
                        dinner: Some("D".to_string()),
                    }),
                    accommodation: Some(Accommodation {
                        name: Some("H".to_string()),
                        kind: Some("Ryokan".to_string()),
                    }),
                },
                DayPlan {
                    day: 2,
                    title: "Temples".to_string(),
                    activities: vec!["Kinkaku-ji".to_string()],
                    food: None,
                    accommodation: None,
                },
            ],
        }
    }

    #[test]
    fn test_sections_start_collapsed() {
        let view = ItineraryView::from_itinerary(&sample_itinerary());
        assert!(view.sections.iter().all(|s| !s.expanded));
    }

    #[test]
    fn test_round_trip_preserves_order() {
        let itinerary = sample_itinerary();
        let view = ItineraryView::from_itinerary(&itinerary);

        let headers: Vec<String> = view.sections.iter().map(|s| s.header()).collect();
        assert_eq!(headers, vec!["Day 1: Arrival", "Day 2: Temples"]);

        let activities: Vec<&[String]> = view.sections.iter().map(|s| s.activities.as_slice()).collect();
        assert_eq!(activities[0], itinerary.daily_plans[0].activities.as_slice());
        assert_eq!(activities[1], itinerary.daily_plans[1].activities.as_slice());
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut view = ItineraryView::from_itinerary(&sample_itinerary());

        view.toggle_section(0);
        assert!(view.sections[0].expanded);
        assert!(!view.sections[1].expanded);

        view.toggle_section(1);
        assert!(view.sections[0].expanded);
        assert!(view.sections[1].expanded);

        view.toggle_section(0);
        assert!(!view.sections[0].expanded);
        assert!(view.sections[1].expanded);

        // Out of range is a no-op
        view.toggle_section(99);
    }

    #[test]
    fn test_placeholder_substitution() {
        let view = ItineraryView::from_itinerary(&sample_itinerary());

        assert_eq!(view.sections[0].meals, ["B", NOT_SPECIFIED, "D"]);
        assert_eq!(view.sections[0].accommodation, "H (Ryokan)");

        assert_eq!(
            view.sections[1].meals,
            [NOT_SPECIFIED, NOT_SPECIFIED, NOT_SPECIFIED]
        );
        assert_eq!(view.sections[1].accommodation, NOT_SPECIFIED);
    }

    #[test]
    fn test_expand_all_and_restore() {
        let mut view = ItineraryView::from_itinerary(&sample_itinerary());
        view.toggle_section(1);

        let saved = view.expanded_states();
        assert_eq!(saved, vec![false, true]);

        view.expand_all();
        assert!(view.sections.iter().all(|s| s.expanded));

        view.set_expanded_states(&saved);
        assert_eq!(view.expanded_states(), saved);
    }
}
