//! Bounded retry policy for inference calls.
//!
//! The policy is stateless and pure: the HTTP client reports what happened on
//! each attempt and the policy answers with how long to wait before the next
//! call, or with the failure to give up with. Keeping the decision here means
//! the retry ceiling is testable without a network.
//!
//! Two retryable outcomes are distinguished:
//! - **Warming up**: the service signalled it is loading the model. Wait the
//!   server-suggested time (capped), or the default warm-up wait.
//! - **Transport failure**: connection errors, timeouts and unexpected
//!   statuses. Wait a short fixed delay.

use std::time::Duration;

use conversai_types::config::InferenceConfig;
use conversai_types::inference::InferenceFailure;

/// What happened on a single upstream attempt that did not produce a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The service is loading; `estimated_secs` is its own wait estimate, if any.
    WarmingUp { estimated_secs: Option<f64> },
    /// The call failed below the application protocol.
    TransportFailure(String),
}

/// The policy's answer for a failed attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryDecision {
    /// Sleep for the given duration, then make another call.
    RetryAfter(Duration),
    /// Stop and report this failure.
    GiveUp(InferenceFailure),
}

/// Retry ceiling and wait durations for one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    default_warmup_wait: Duration,
    max_warmup_wait: Duration,
    network_retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(
        max_attempts: u32,
        default_warmup_wait: Duration,
        max_warmup_wait: Duration,
        network_retry_delay: Duration,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            default_warmup_wait,
            max_warmup_wait: max_warmup_wait.max(default_warmup_wait),
            network_retry_delay,
        }
    }

    /// Build the policy from configuration. Invalid durations fall back to zero.
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(
            config.max_attempts,
            secs_or_zero(config.warmup_wait_secs),
            secs_or_zero(config.max_warmup_wait_secs),
            secs_or_zero(config.network_retry_delay_secs),
        )
    }

    /// Total upstream calls allowed, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decide what to do after `attempt` (1-based) ended with `outcome`.
    ///
    /// Never asks for a wait after the final attempt.
    pub fn decide(&self, attempt: u32, outcome: &AttemptOutcome) -> RetryDecision {
        let exhausted = attempt >= self.max_attempts;
        match outcome {
            AttemptOutcome::WarmingUp { .. } if exhausted => {
                RetryDecision::GiveUp(InferenceFailure::ServiceUnavailable { attempts: attempt })
            }
            AttemptOutcome::TransportFailure(message) if exhausted => {
                RetryDecision::GiveUp(InferenceFailure::Network {
                    attempts: attempt,
                    message: message.clone(),
                })
            }
            AttemptOutcome::WarmingUp { estimated_secs } => {
                RetryDecision::RetryAfter(self.warmup_wait(*estimated_secs))
            }
            AttemptOutcome::TransportFailure(_) => {
                RetryDecision::RetryAfter(self.network_retry_delay)
            }
        }
    }

    /// Server-suggested wait, capped; default when absent or unusable.
    fn warmup_wait(&self, estimated_secs: Option<f64>) -> Duration {
        estimated_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
            .map(|wait| wait.min(self.max_warmup_wait))
            .unwrap_or(self.default_warmup_wait)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&InferenceConfig::default())
    }
}

fn secs_or_zero(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}
