//! Observability for ConversAI: subscriber setup and span naming conventions.

pub mod genai_attrs;
pub mod tracing_setup;
