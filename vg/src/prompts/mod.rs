//! Prompt Template System
//!
//! Loads and renders the `.pmt` (prompt template) files that turn a trip
//! request into the instruction sent to the model.
//!
//! Template loading chain:
//! 1. `.voyage/prompts/{name}.pmt` (user override)
//! 2. `prompts/{name}.pmt` (repo default)
//! 3. Embedded fallback in the binary
//!
//! Templates use Handlebars syntax for variable substitution.

mod builder;
pub mod embedded;
mod loader;

pub use builder::{PromptContext, VIBE_FALLBACK, response_schema};
pub use loader::PromptLoader;
