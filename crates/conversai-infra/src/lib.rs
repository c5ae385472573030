//! Infrastructure layer for ConversAI.
//!
//! Contains implementations of the traits defined in `conversai-core`:
//! SQLite conversation storage and the Hugging Face inference client, plus
//! the configuration loader.

pub mod config;
pub mod inference;
pub mod sqlite;
