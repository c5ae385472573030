//! OpenTelemetry GenAI Semantic Convention values.
//!
//! Inference spans carry `gen_ai.*` fields (written inline as dotted field
//! names in `info_span!`). This module holds the values placed in them so
//! every call site agrees on spelling.
//!
//! Span naming convention: `"{operation} {model}"`, e.g.
//! `"text_completion meta-llama/Llama-3.1-8B-Instruct"`.

/// Operation name for a single prompt-in, text-out generation.
pub const OP_TEXT_COMPLETION: &str = "text_completion";

/// Provider name for the Hugging Face serverless inference API.
pub const PROVIDER_HUGGING_FACE: &str = "huggingface";

/// Build a span display name following the `"{operation} {model}"` convention.
pub fn span_name(operation: &str, model: &str) -> String {
    format!("{operation} {model}")
}
