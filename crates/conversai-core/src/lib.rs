//! Business logic and repository trait definitions for ConversAI.
//!
//! This crate defines the "ports" (repository and inference traits) that the
//! infrastructure layer implements. It depends only on `conversai-types` --
//! never on `conversai-infra` or any database/HTTP crate.

pub mod chat;
pub mod inference;
pub mod store;
