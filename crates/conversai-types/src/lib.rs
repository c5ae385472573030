//! Shared domain types for ConversAI.
//!
//! This crate contains the core domain types used across the workspace:
//! conversation turns, chat request/reply payloads, inference failures,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod inference;
pub mod turn;
