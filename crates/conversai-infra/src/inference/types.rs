//! Hugging Face Inference API wire types.
//!
//! Text-generation request body, the warm-up body returned with HTTP 503, and
//! extraction of the generated text from a success body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for a text-generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

/// Generation parameters sent with every request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    /// Return only the continuation, not the prompt followed by it.
    pub return_full_text: bool,
    pub max_new_tokens: u32,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(inputs: &'a str, max_new_tokens: u32) -> Self {
        Self {
            inputs,
            parameters: GenerationParameters {
                return_full_text: false,
                max_new_tokens,
            },
        }
    }
}

/// Body sent with HTTP 503 while the model is being loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarmupBody {
    #[serde(default)]
    pub estimated_time: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Extract the trimmed `generated_text` of the first generation.
///
/// Expected shape: `[{"generated_text": "..."}, ...]`. Anything else, or a
/// reply that is empty after trimming, is reported as malformed with a short
/// description of what was wrong.
pub fn extract_generated_text(body: &str) -> Result<String, String> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| format!("body is not JSON: {e}"))?;

    let first = value
        .as_array()
        .ok_or_else(|| format!("expected a JSON array, got {}", kind_of(&value)))?
        .first()
        .ok_or_else(|| "empty generation list".to_string())?;

    let text = first
        .get("generated_text")
        .and_then(Value::as_str)
        .ok_or_else(|| "first generation has no string `generated_text`".to_string())?
        .trim();

    if text.is_empty() {
        return Err("generated text is empty".to_string());
    }
    Ok(text.to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
