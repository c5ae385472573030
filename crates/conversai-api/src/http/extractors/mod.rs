//! Request extractors with `{error, message}` rejections.

pub mod json;
