//! OpenAI API client implementation
//!
//! Fallback provider for platforms without native response-schema support.
//! The chat completion is pinned to JSON output (response_format json_object)
//! and the itinerary schema rides inside the prompt text the builder already
//! embedded; the request's schema attachment is ignored.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{GenerationRequest, GenerationResponse, LlmClient, LlmError};
use crate::config::ResolvedLlmConfig;

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let http = Client::builder().build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the chat completions endpoint
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");

        serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "max_tokens": request.max_tokens.min(self.max_tokens),
            "response_format": { "type": "json_object" },
        })
    }

    /// Pull the reply text out of the API response
    fn parse_response(&self, api_response: OpenAIResponse) -> Result<GenerationResponse, LlmError> {
        debug!(choices = api_response.choices.len(), "parse_response: called");
        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse("response carried no message content".to_string()));
        }

        Ok(GenerationResponse { text })
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    /// One attempt, no retry: any failure propagates immediately
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        debug!(%self.model, "generate: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            debug!(%status, "generate: API error");
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message });
        }

        debug!("generate: success");
        let api_response: OpenAIResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAIClient {
        OpenAIClient {
            model: "gpt-4o-mini".to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://api.openai.com".to_string(),
            http: Client::new(),
            max_tokens: 4096,
        }
    }

    #[test]
    fn test_build_request_body_pins_json_output() {
        let client = test_client();
        let request = GenerationRequest::text_only("Plan a trip", 1000);

        let body = client.build_request_body(&request);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Plan a trip");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_native_schema_is_ignored() {
        // This provider relies on the schema text embedded in the prompt
        let client = test_client();
        let request = GenerationRequest {
            prompt: "p".to_string(),
            response_schema: Some(serde_json::json!({"type": "object"})),
            max_tokens: 100,
        };

        let body = client.build_request_body(&request);
        assert!(body.get("response_schema").is_none());
        assert!(body["response_format"].get("json_schema").is_none());
    }

    #[test]
    fn test_parse_response_empty_is_invalid() {
        let client = test_client();
        let api_response = OpenAIResponse { choices: vec![] };
        assert!(client.parse_response(api_response).is_err());
    }
}
