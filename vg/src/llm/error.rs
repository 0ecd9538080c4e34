//! LLM error types

use thiserror::Error;

/// Errors that can occur during a generation request
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// True when the request itself failed, as opposed to a malformed reply
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::ApiError { .. } | LlmError::Network(_))
    }
}
