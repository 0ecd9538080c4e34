//! LLM client module for Voyage
//!
//! Provides the generation request to the hosted model. One call per submit,
//! no retry, no backoff: a failure propagates straight back to the submit
//! boundary, by design.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod gemini;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use types::{GenerationRequest, GenerationResponse};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Resolves provider defaults from the config and creates the matching
/// client. Supports "gemini" and "openai" providers.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    let resolved = config.resolve();
    debug!(provider = %resolved.provider, model = %resolved.model, "create_client: called");

    match resolved.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(&resolved)?))
        }
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(&resolved)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini, openai",
                other
            )))
        }
    }
}
