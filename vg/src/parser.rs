//! Response parser
//!
//! Hosted models wrap JSON in prose or code fences even when asked for pure
//! JSON output, so the parser takes the widest brace-to-brace span it can
//! find and decodes that. Structural leniency lives in the domain types; the
//! only hard failures here are "no span at all" and "span does not decode".

use thiserror::Error;
use tracing::debug;

use crate::domain::Itinerary;

/// Errors from decoding raw model output
#[derive(Debug, Error)]
pub enum ParseError {
    /// The reply contained no `{...}` span at all
    #[error("no JSON object found in model output")]
    NoJsonFound,

    /// A span was found but did not decode as an itinerary
    #[error("model output is not a valid itinerary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extract the widest `{...}` span from raw text
///
/// Returns the substring from the first `{` to the last `}` inclusive, or
/// None when no such span exists.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse a raw model reply into an itinerary
pub fn parse_itinerary(raw: &str) -> Result<Itinerary, ParseError> {
    debug!(raw_len = raw.len(), "parse_itinerary: called");
    let span = extract_json_span(raw).ok_or(ParseError::NoJsonFound)?;
    debug!(span_len = span.len(), "parse_itinerary: decoding span");
    Ok(serde_json::from_str(span)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BODY: &str = r#"{"destinationName":"Kyoto","tripTitle":"T","summary":"S","dailyPlans":[{"day":1,"title":"D1","activities":["A"],"food":{"breakfast":"B","lunch":"L","dinner":"Di"},"accommodation":{"name":"H","type":"Hotel"}}]}"#;

    #[test]
    fn test_parse_bare_json() {
        let itinerary = parse_itinerary(BODY).unwrap();
        assert_eq!(itinerary.destination_name, "Kyoto");
        assert_eq!(itinerary.daily_plans.len(), 1);
        assert_eq!(itinerary.daily_plans[0].title, "D1");
    }

    #[test]
    fn test_parse_with_prose_wrapping() {
        let raw = format!("Sure! {}", BODY);
        let itinerary = parse_itinerary(&raw).unwrap();
        assert_eq!(itinerary.destination_name, "Kyoto");
    }

    #[test]
    fn test_parse_with_code_fence() {
        let raw = format!("```json\n{}\n```", BODY);
        let itinerary = parse_itinerary(&raw).unwrap();
        assert_eq!(itinerary.trip_title, "T");
    }

    #[test]
    fn test_no_braces_is_no_json_found() {
        let result = parse_itinerary("I could not produce an itinerary, sorry.");
        assert!(matches!(result, Err(ParseError::NoJsonFound)));
    }

    #[test]
    fn test_reversed_braces_is_no_json_found() {
        let result = parse_itinerary("} nothing here {");
        assert!(matches!(result, Err(ParseError::NoJsonFound)));
    }

    #[test]
    fn test_undecodable_span_is_json_error() {
        let result = parse_itinerary("reply: {not json at all}");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_matches_direct_decode() {
        // Total over the documented input class: wrapping changes nothing
        let direct: crate::domain::Itinerary = serde_json::from_str(BODY).unwrap();
        let wrapped = parse_itinerary(&format!("prefix {} suffix", BODY)).unwrap();
        assert_eq!(wrapped.destination_name, direct.destination_name);
        assert_eq!(wrapped.daily_plans.len(), direct.daily_plans.len());
    }

    #[test]
    fn test_extract_json_span() {
        assert_eq!(extract_json_span("a {b} c"), Some("{b}"));
        assert_eq!(extract_json_span("{x}{y}"), Some("{x}{y}"));
        assert_eq!(extract_json_span("no braces"), None);
    }

    proptest! {
        /// Any brace-free wrapping around a valid document parses identically
        #[test]
        fn prop_parses_with_arbitrary_wrapping(prefix in "[^{}]{0,40}", suffix in "[^{}]{0,40}") {
            let raw = format!("{}{}{}", prefix, BODY, suffix);
            let itinerary = parse_itinerary(&raw).unwrap();
            prop_assert_eq!(itinerary.destination_name.as_str(), "Kyoto");
            prop_assert_eq!(itinerary.daily_plans.len(), 1);
        }
    }
}
