//! Inference failure taxonomy.
//!
//! Every failure of the remote text-generation call resolves to one of these
//! kinds. None of them is fatal to the caller: each maps to a fixed,
//! user-readable fallback reply that is returned in place of generated text.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Reply used when the upstream kept answering "warming up" until the
/// retry ceiling was reached.
pub const FALLBACK_UNAVAILABLE: &str =
    "Sorry, the AI model is currently unavailable after multiple attempts. Please try again later.";

/// Reply used when transport-level failures exhausted the retry ceiling.
pub const FALLBACK_NETWORK: &str =
    "I'm sorry, I'm having trouble connecting to the AI service. Please try again in a moment.";

/// Reply used when the upstream answered with an unexpected body shape.
pub const FALLBACK_MALFORMED: &str =
    "I'm sorry, I received an unusual response from the AI. Please try again.";

/// Reply used when no inference credential is configured.
pub const FALLBACK_NOT_CONFIGURED: &str =
    "Sorry, the AI service is not configured correctly. Please contact the administrator.";

/// Why an inference call did not produce generated text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceFailure {
    #[error("inference service unavailable after {attempts} attempts")]
    ServiceUnavailable { attempts: u32 },

    #[error("network error after {attempts} attempts: {message}")]
    Network { attempts: u32, message: String },

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),

    #[error("inference credential is not configured")]
    MissingCredential,
}

impl InferenceFailure {
    /// The user-safe text returned to the client in place of a reply.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            InferenceFailure::ServiceUnavailable { .. } => FALLBACK_UNAVAILABLE,
            InferenceFailure::Network { .. } => FALLBACK_NETWORK,
            InferenceFailure::MalformedResponse(_) => FALLBACK_MALFORMED,
            InferenceFailure::MissingCredential => FALLBACK_NOT_CONFIGURED,
        }
    }

    /// Coarse classification used for logging and metrics labels.
    pub fn kind(&self) -> FailureKind {
        match self {
            InferenceFailure::ServiceUnavailable { .. } => FailureKind::ServiceUnavailable,
            InferenceFailure::Network { .. } => FailureKind::Network,
            InferenceFailure::MalformedResponse(_) => FailureKind::MalformedResponse,
            InferenceFailure::MissingCredential => FailureKind::MissingCredential,
        }
    }

    /// Configuration problems are operator errors rather than upstream noise.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, InferenceFailure::MissingCredential)
    }
}

/// Field-free discriminant of [`InferenceFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ServiceUnavailable,
    Network,
    MalformedResponse,
    MissingCredential,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ServiceUnavailable => write!(f, "service_unavailable"),
            FailureKind::Network => write!(f, "network"),
            FailureKind::MalformedResponse => write!(f, "malformed_response"),
            FailureKind::MissingCredential => write!(f, "missing_credential"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_has_non_empty_fallback() {
        let failures = [
            InferenceFailure::ServiceUnavailable { attempts: 3 },
            InferenceFailure::Network {
                attempts: 3,
                message: "connection refused".to_string(),
            },
            InferenceFailure::MalformedResponse("{}".to_string()),
            InferenceFailure::MissingCredential,
        ];
        for failure in failures {
            assert!(!failure.fallback_reply().trim().is_empty());
        }
    }

    #[test]
    fn test_fallbacks_are_distinct() {
        let replies = [
            FALLBACK_UNAVAILABLE,
            FALLBACK_NETWORK,
            FALLBACK_MALFORMED,
            FALLBACK_NOT_CONFIGURED,
        ];
        for (i, a) in replies.iter().enumerate() {
            for b in &replies[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        assert!(InferenceFailure::MissingCredential.is_configuration_error());
        assert!(!InferenceFailure::ServiceUnavailable { attempts: 3 }.is_configuration_error());
    }

    #[test]
    fn test_failure_display() {
        let err = InferenceFailure::Network {
            attempts: 3,
            message: "timed out".to_string(),
        };
        assert_eq!(err.to_string(), "network error after 3 attempts: timed out");
        assert_eq!(err.kind().to_string(), "network");
    }
}
