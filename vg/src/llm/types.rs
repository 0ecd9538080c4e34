//! LLM request/response types for Voyage
//!
//! Provider-agnostic shapes for a single schema-constrained generation call.

use tracing::debug;

/// A generation request - everything needed for one model call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Fully rendered prompt text (from the Handlebars template)
    pub prompt: String,

    /// Response schema, honored natively by providers that support one.
    /// Providers without native schema support ignore this and rely on the
    /// schema text the prompt builder already embedded in the prompt.
    pub response_schema: Option<serde_json::Value>,

    /// Max tokens for the response (from config)
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Plain prompt request without a native schema attachment
    pub fn text_only(prompt: impl Into<String>, max_tokens: u32) -> Self {
        debug!("GenerationRequest::text_only: called");
        Self {
            prompt: prompt.into(),
            response_schema: None,
            max_tokens,
        }
    }
}

/// Raw model output for one request
///
/// The text is expected to contain a JSON itinerary somewhere inside it,
/// possibly wrapped in prose or code fences. Extracting it is the response
/// parser's job, not the client's.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_has_no_schema() {
        let request = GenerationRequest::text_only("hello", 256);
        assert_eq!(request.prompt, "hello");
        assert!(request.response_schema.is_none());
        assert_eq!(request.max_tokens, 256);
    }
}
