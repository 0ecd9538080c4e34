//! Generation pipeline
//!
//! One submit runs validation, prompt assembly, the model call, and the
//! parse. Every failure is typed so the action boundary (TUI submit handler
//! or the `plan` command) can show the right inline message. Nothing here is
//! fatal; the user can always resubmit.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{Itinerary, TripRequest};
use crate::llm::{GenerationRequest, LlmClient, LlmError};
use crate::parser::{ParseError, parse_itinerary};
use crate::prompts::{PromptContext, PromptLoader, response_schema};

/// Errors surfaced in the result area after a submit
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Submit gate: no destination entered, no request sent
    #[error("Please enter a destination.")]
    EmptyDestination,

    /// Prompt template failed to load or render
    #[error("prompt template error: {0}")]
    Template(String),

    /// The request itself failed; the underlying message is surfaced verbatim
    #[error(transparent)]
    Transport(#[from] LlmError),

    /// The request succeeded but the reply held no decodable itinerary
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl GenerateError {
    /// Message for the result area
    ///
    /// Transport failures keep the underlying details; parse failures get a
    /// generic message since the raw reply is useless to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyDestination => self.to_string(),
            Self::Template(_) | Self::Parse(_) => {
                "We couldn't generate your itinerary. Please try again.".to_string()
            }
            Self::Transport(e) => format!(
                "We couldn't generate your itinerary. This could be due to a restricted location \
                 or an issue with the AI model. Please try a different destination. Details: {}",
                e
            ),
        }
    }
}

/// Run one generation end to end
///
/// The caller holds the busy flag; this function performs exactly one model
/// call and never retries. An empty destination returns before any request
/// is built or sent.
pub async fn run_generation(
    client: Arc<dyn LlmClient>,
    loader: &PromptLoader,
    request: &TripRequest,
    max_tokens: u32,
) -> Result<Itinerary, GenerateError> {
    if !request.has_destination() {
        debug!("run_generation: empty destination, refusing");
        return Err(GenerateError::EmptyDestination);
    }

    let context = PromptContext::from_request(request);
    let prompt = loader
        .itinerary_prompt(&context)
        .map_err(|e| GenerateError::Template(e.to_string()))?;

    info!(destination = %request.destination_trimmed(), "run_generation: sending request");
    let response = client
        .generate(GenerationRequest {
            prompt,
            response_schema: Some(response_schema()),
            max_tokens,
        })
        .await?;

    let itinerary = parse_itinerary(&response.text)?;
    debug!(days = itinerary.daily_plans.len(), "run_generation: parsed itinerary");
    Ok(itinerary)
}
