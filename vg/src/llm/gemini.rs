//! Gemini API client implementation
//!
//! Calls the generateContent endpoint with a generation config requesting
//! schema-constrained JSON output (responseMimeType plus responseSchema).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{GenerationRequest, GenerationResponse, LlmClient, LlmError};
use crate::config::ResolvedLlmConfig;

/// Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from resolved configuration
    ///
    /// The HTTP client is built without a request timeout: a generation call
    /// runs until the API answers or the connection drops.
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

    /// Build the request body for the generateContent endpoint
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");

        let mut generation_config = serde_json::json!({
            "responseMimeType": "application/json",
            "maxOutputTokens": request.max_tokens.min(self.max_tokens),
        });

        if let Some(schema) = &request.response_schema {
            debug!("build_request_body: attaching native response schema");
            generation_config["responseSchema"] = schema.clone();
        }

        serde_json::json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": generation_config,
        })
    }

    /// Pull the reply text out of the API response
    fn parse_response(&self, api_response: GeminiResponse) -> Result<GenerationResponse, LlmError> {
        debug!(candidates = api_response.candidates.len(), "parse_response: called");
        let text = api_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "response carried no candidate text".to_string(),
            ));
        }

        Ok(GenerationResponse { text })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    /// One attempt, no retry: any failure propagates immediately
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        debug!(%self.model, "generate: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
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
        let api_response: GeminiResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient {
            model: "gemini-2.5-flash".to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            http: Client::new(),
            max_tokens: 8192,
        }
    }

    #[test]
    fn test_build_request_body_requests_json_output() {
        let client = test_client();
        let request = GenerationRequest::text_only("Plan a trip", 1000);

        let body = client.build_request_body(&request);

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan a trip");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
        assert!(body["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_build_request_body_attaches_schema() {
        let client = test_client();
        let schema = serde_json::json!({"type": "object"});
        let request = GenerationRequest {
            prompt: "Plan a trip".to_string(),
            response_schema: Some(schema.clone()),
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_max_tokens_capped() {
        let client = GeminiClient {
            max_tokens: 500,
            ..test_client()
        };
        let request = GenerationRequest::text_only("p", 9000);

        let body = client.build_request_body(&request);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 500);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let client = test_client();
        let api_response = GeminiResponse {
            candidates: vec![GeminiCandidate {
                content: GeminiContent {
                    parts: vec![
                        GeminiPart { text: "{\"a\":".to_string() },
                        GeminiPart { text: "1}".to_string() },
                    ],
                },
            }],
        };

        let response = client.parse_response(api_response).unwrap();
        assert_eq!(response.text, "{\"a\":1}");
    }

    #[test]
    fn test_parse_response_empty_is_invalid() {
        let client = test_client();
        let api_response = GeminiResponse { candidates: vec![] };
        assert!(client.parse_response(api_response).is_err());
    }
}
