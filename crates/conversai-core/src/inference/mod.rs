//! Inference abstractions for ConversAI.
//!
//! - `InferenceBackend`: RPITIT trait for concrete text-generation clients
//! - `BoxInferenceBackend`: object-safe wrapper for dynamic dispatch
//! - `RetryPolicy`: bounded retry decisions for warm-up and transport failures

pub mod backend;
pub mod box_backend;
pub mod retry;
