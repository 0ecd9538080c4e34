//! Prompt context and the itinerary response schema

use serde::Serialize;
use tracing::debug;

use crate::domain::TripRequest;

/// Fallback vibe phrase when the field is left empty
pub const VIBE_FALLBACK: &str = "A standard, well-rounded experience.";

/// Context for rendering the itinerary prompt template
///
/// Values are interpolated into the template as-is. User text is not escaped
/// against prompt injection; see DESIGN.md for the open question.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    pub destination: String,
    pub duration_days: String,
    pub budget: String,
    pub age_group: String,
    pub interests: String,
    pub trip_vibe: String,
    pub spot_preference: String,
    /// Pretty-printed response schema, embedded verbatim in the prompt
    pub schema: String,
}

impl PromptContext {
    /// Build a context from a trip request
    ///
    /// The caller has already validated the destination. Empty interests map
    /// to "General sightseeing"; an empty vibe maps to [`VIBE_FALLBACK`].
    pub fn from_request(request: &TripRequest) -> Self {
        debug!(destination = %request.destination_trimmed(), "PromptContext::from_request: called");

        let trip_vibe = {
            let vibe = request.trip_vibe.trim();
            if vibe.is_empty() { VIBE_FALLBACK } else { vibe }
        };

        let schema = serde_json::to_string_pretty(&response_schema()).unwrap_or_default();

        Self {
            destination: request.destination_trimmed().to_string(),
            duration_days: request.duration_days.clone(),
            budget: request.preferences.budget().label().to_string(),
            age_group: request.age_group.clone(),
            interests: request.preferences.interests_line(),
            trip_vibe: trip_vibe.to_string(),
            spot_preference: request.preferences.spot_preference().label().to_string(),
            schema,
        }
    }
}

/// JSON schema for the itinerary document the model must produce
///
/// Sent as the native response schema on providers that support one and
/// embedded as text in the prompt for those that do not.
pub fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "destinationName": {
                "type": "string",
                "description": "The name of the destination, e.g. 'Tokyo, Japan'."
            },
            "tripTitle": {
                "type": "string",
                "description": "A creative and catchy title for the trip, e.g. 'An Adventurous Week in the Swiss Alps'."
            },
            "summary": {
                "type": "string",
                "description": "A brief, 2-3 sentence summary of the overall trip plan."
            },
            "dailyPlans": {
                "type": "array",
                "description": "An array of daily plans, one for each day of the trip.",
                "items": {
                    "type": "object",
                    "properties": {
                        "day": {
                            "type": "integer",
                            "description": "The day number (e.g. 1, 2, 3)."
                        },
                        "title": {
                            "type": "string",
                            "description": "A short, descriptive title for the day's theme."
                        },
                        "activities": {
                            "type": "array",
                            "description": "A list of 2-4 activities for the day.",
                            "items": { "type": "string" }
                        },
                        "food": {
                            "type": "object",
                            "description": "Suggestions for breakfast, lunch, and dinner.",
                            "properties": {
                                "breakfast": { "type": "string", "description": "A suggestion for a breakfast spot or type of food." },
                                "lunch": { "type": "string", "description": "A suggestion for a lunch spot or type of food." },
                                "dinner": { "type": "string", "description": "A suggestion for a dinner spot or type of food." }
                            }
                        },
                        "accommodation": {
                            "type": "object",
                            "description": "A hotel suggestion that fits the user's budget.",
                            "properties": {
                                "name": { "type": "string", "description": "Name of the suggested hotel." },
                                "type": { "type": "string", "description": "The type of accommodation (e.g. Boutique Hotel, Luxury Resort, Budget Hostel)." }
                            }
                        }
                    },
                    "required": ["day", "title", "activities", "food", "accommodation"]
                }
            }
        },
        "required": ["destinationName", "tripTitle", "summary", "dailyPlans"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Preferences, TripRequest};

    fn kyoto_request() -> TripRequest {
        let mut preferences = Preferences::new();
        preferences.select_budget(Budget::Luxury);
        preferences.toggle_interest("Food");

        TripRequest {
            destination: "Kyoto".to_string(),
            duration_days: "3".to_string(),
            age_group: "26-40".to_string(),
            trip_vibe: "relaxed".to_string(),
            preferences,
        }
    }

    #[test]
    fn test_context_carries_all_fields() {
        let context = PromptContext::from_request(&kyoto_request());

        assert_eq!(context.destination, "Kyoto");
        assert_eq!(context.duration_days, "3");
        assert_eq!(context.budget, "Luxury");
        assert_eq!(context.interests, "Food");
        assert_eq!(context.trip_vibe, "relaxed");
        assert_eq!(context.spot_preference, "Popular Tourist Spots");
    }

    #[test]
    fn test_empty_vibe_falls_back() {
        let mut request = kyoto_request();
        request.trip_vibe = "   ".to_string();

        let context = PromptContext::from_request(&request);
        assert_eq!(context.trip_vibe, VIBE_FALLBACK);
    }

    #[test]
    fn test_empty_interests_fall_back() {
        let mut request = kyoto_request();
        request.preferences = Preferences::new();

        let context = PromptContext::from_request(&request);
        assert_eq!(context.interests, "General sightseeing");
    }

    #[test]
    fn test_schema_text_is_embedded() {
        let context = PromptContext::from_request(&kyoto_request());
        assert!(context.schema.contains("destinationName"));
        assert!(context.schema.contains("dailyPlans"));
    }

    #[test]
    fn test_response_schema_shape() {
        let schema = response_schema();

        assert_eq!(schema["type"], "object");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["destinationName", "tripTitle", "summary", "dailyPlans"]);

        let day_required = &schema["properties"]["dailyPlans"]["items"]["required"];
        assert!(day_required.as_array().unwrap().iter().any(|v| v == "activities"));
    }
}
