// Artifact generation: prompt templates, provider invocation, output sanitizing.
// All provider calls go through llm_client; nothing here talks HTTP directly.

pub mod artifacts;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod sanitize;
