//! InferenceBackend trait definition.
//!
//! This is the core abstraction over the remote text-generation service.
//! Implementations own the HTTP call, the retry loop and response
//! normalization; callers only ever see generated text or an
//! [`InferenceFailure`] that carries its own fallback reply.

use conversai_types::inference::InferenceFailure;

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in conversai-infra (e.g., `HuggingFaceClient`).
pub trait InferenceBackend: Send + Sync {
    /// Human-readable backend name (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Whether a credential is available. An unconfigured backend answers
    /// every call with [`InferenceFailure::MissingCredential`].
    fn is_configured(&self) -> bool;

    /// Generate a reply for non-empty `text`.
    ///
    /// On success the text is already trimmed and non-empty.
    fn generate(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, InferenceFailure>> + Send;
}
