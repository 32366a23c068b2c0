//! Project-brief generation: prompt assembly, completion normalization,
//! policy backfill, template fallback and the orchestrator tying them together.
//! All model calls go through `llm_client::Completer`.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod policies;
pub mod prompts;
