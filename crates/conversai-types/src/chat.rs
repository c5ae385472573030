//! Chat exchange payloads and the per-request exchange stages.
//!
//! A chat exchange moves through a fixed sequence of stages:
//! `Received -> Validated -> Inferred -> Persisted -> Responded`.
//! Any stage can instead end in a failure, which records the stage it
//! was in when it failed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Inbound chat message as sent by the browser client.
///
/// Both fields are optional at the wire level so that a missing message can
/// be reported as a validation error instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            message: Some(message.into()),
            session_id,
        }
    }
}

/// Reply payload returned for a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Stage of a single chat exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStage {
    Received,
    Validated,
    Inferred,
    Persisted,
    Responded,
}

impl ExchangeStage {
    /// The stage that follows this one, or `None` once the exchange has responded.
    pub fn next(self) -> Option<Self> {
        match self {
            ExchangeStage::Received => Some(ExchangeStage::Validated),
            ExchangeStage::Validated => Some(ExchangeStage::Inferred),
            ExchangeStage::Inferred => Some(ExchangeStage::Persisted),
            ExchangeStage::Persisted => Some(ExchangeStage::Responded),
            ExchangeStage::Responded => None,
        }
    }
}

impl fmt::Display for ExchangeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeStage::Received => write!(f, "received"),
            ExchangeStage::Validated => write!(f, "validated"),
            ExchangeStage::Inferred => write!(f, "inferred"),
            ExchangeStage::Persisted => write!(f, "persisted"),
            ExchangeStage::Responded => write!(f, "responded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_accepts_empty_object() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_none());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn test_chat_request_with_session() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message":"hi","session_id":"s-1"}"#).unwrap();
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert_eq!(req.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn test_chat_reply_timestamp_is_rfc3339() {
        let reply = ChatReply {
            reply: "hello".to_string(),
            session_id: "s-1".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&reply).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn test_exchange_stage_order() {
        let mut stage = ExchangeStage::Received;
        let mut seen = vec![stage];
        while let Some(next) = stage.next() {
            seen.push(next);
            stage = next;
        }
        assert_eq!(
            seen,
            vec![
                ExchangeStage::Received,
                ExchangeStage::Validated,
                ExchangeStage::Inferred,
                ExchangeStage::Persisted,
                ExchangeStage::Responded,
            ]
        );
    }

    #[test]
    fn test_exchange_stage_display() {
        assert_eq!(ExchangeStage::Persisted.to_string(), "persisted");
    }
}
