//! HTTP/REST API layer for ConversAI.
//!
//! Axum-based JSON API under `/api/` with CORS, request tracing and optional
//! static serving of the browser client.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
