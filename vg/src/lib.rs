//! Voyage - AI travel-itinerary planner for the terminal
//!
//! Voyage collects trip preferences through a form, asks a hosted LLM for a
//! schema-constrained JSON itinerary, parses the reply leniently, and renders
//! the result as a collapsible day-by-day plan that can be exported as a
//! paginated text document.
//!
//! # Core pipeline
//!
//! form input -> [`prompts`] -> [`llm`] -> [`parser`] -> [`render`]
//!
//! # Modules
//!
//! - [`domain`] - itinerary wire types and preference state
//! - [`prompts`] - Handlebars prompt templates and the response schema
//! - [`llm`] - LLM client trait and Gemini/OpenAI implementations
//! - [`parser`] - JSON span extraction from raw model output
//! - [`render`] - presentation-independent itinerary view-model
//! - [`pipeline`] - one submit, end to end, with typed errors
//! - [`export`] - paginated document writer
//! - [`state`] - session state and the single-flight guard
//! - [`tui`] - interactive terminal front end
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod render;
pub mod state;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, CredentialStatus, ExportConfig, LlmConfig, StorageConfig};
pub use domain::{
    Accommodation, Budget, DayPlan, Itinerary, Meals, Preferences, SpotPreference, TripRequest,
};
pub use export::{ExportError, export_document, export_file_name};
pub use llm::{
    GeminiClient, GenerationRequest, GenerationResponse, LlmClient, LlmError, OpenAIClient,
    create_client,
};
pub use parser::{ParseError, extract_json_span, parse_itinerary};
pub use pipeline::{GenerateError, run_generation};
pub use prompts::{PromptContext, PromptLoader, response_schema};
pub use render::{DaySection, ItineraryView};
pub use state::{Page, Session};
