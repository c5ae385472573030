//! Inference backends.
//!
//! - `HuggingFaceClient`: Hugging Face serverless Inference API over reqwest
//! - `types`: request/response wire shapes

pub mod huggingface;
pub mod types;
