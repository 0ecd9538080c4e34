//! Trip request assembled from the form

use super::Preferences;

/// Everything the prompt builder needs for one generation
///
/// Free-text fields are carried as the user typed them; the only gate is the
/// trimmed destination, checked by the caller before any request is sent.
#[derive(Debug, Clone, Default)]
pub struct TripRequest {
    /// Where to go (required, non-empty after trim)
    pub destination: String,

    /// Trip length as entered in the form, e.g. "3"
    pub duration_days: String,

    /// Age group of the travellers
    pub age_group: String,

    /// Desired trip vibe, free text, may be empty
    pub trip_vibe: String,

    /// Budget, spot preference, and interests
    pub preferences: Preferences,
}

impl TripRequest {
    /// Destination with surrounding whitespace removed
    pub fn destination_trimmed(&self) -> &str {
        self.destination.trim()
    }

    /// Submit gate: false when the destination is empty after trimming
    pub fn has_destination(&self) -> bool {
        !self.destination_trimmed().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_destination() {
        let mut request = TripRequest {
            destination: "Kyoto".to_string(),
            ..Default::default()
        };
        assert!(request.has_destination());

        request.destination = "   ".to_string();
        assert!(!request.has_destination());

        request.destination = String::new();
        assert!(!request.has_destination());
    }

    #[test]
    fn test_destination_trimmed() {
        let request = TripRequest {
            destination: "  Lisbon, Portugal  ".to_string(),
            ..Default::default()
        };
        assert_eq!(request.destination_trimmed(), "Lisbon, Portugal");
    }
}
