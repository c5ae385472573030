//! Conversation persistence abstractions for ConversAI.
//!
//! This module defines the `ConversationRepository` trait that the
//! infrastructure layer implements, and the `ConversationStore` facade that
//! turns storage errors into logged, empty results.

pub mod conversation;
pub mod repository;
