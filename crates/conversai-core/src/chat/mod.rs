//! Chat exchange orchestration.

pub mod service;
pub mod session;
