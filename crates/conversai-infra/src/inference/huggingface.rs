//! HuggingFaceClient -- concrete [`InferenceBackend`] for the Hugging Face
//! serverless Inference API.
//!
//! Each generation makes at most `RetryPolicy::max_attempts` POSTs. HTTP 503
//! means the model is still loading and is retried after the server's
//! `estimated_time`; transport errors and other non-success statuses are
//! retried after a short fixed delay. A success status with an unexpected
//! body is not retried.
//!
//! The token is a [`SecretString`] and is only exposed when building the
//! `Authorization` header.

use std::time::Duration;

use conversai_core::inference::backend::InferenceBackend;
use conversai_core::inference::retry::{AttemptOutcome, RetryDecision, RetryPolicy};
use conversai_observe::genai_attrs;
use conversai_types::config::InferenceConfig;
use conversai_types::inference::InferenceFailure;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, debug, info, info_span, warn};

use super::types::{GenerationRequest, WarmupBody, extract_generated_text};

/// How a single POST ended when it did not yield a reply.
enum AttemptError {
    Retryable(AttemptOutcome),
    Malformed(String),
}

/// Hugging Face text-generation client.
///
/// Does not derive Debug so the client cannot be dumped with its token.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    token: Option<SecretString>,
    api_url: String,
    model: String,
    max_new_tokens: u32,
    policy: RetryPolicy,
}

impl HuggingFaceClient {
    /// Build a client for the configured endpoint.
    ///
    /// A `None` token yields a client whose every generation fails with
    /// [`InferenceFailure::MissingCredential`] without touching the network.
    pub fn new(config: &InferenceConfig, token: Option<SecretString>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            token,
            api_url: config.api_url.clone(),
            model: config.model_name().to_string(),
            max_new_tokens: config.max_new_tokens,
            policy: RetryPolicy::from_config(config),
        })
    }

    /// Replace the retry policy (tests use millisecond waits).
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Model identifier taken from the endpoint URL.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn attempt(
        &self,
        token: &SecretString,
        body: &GenerationRequest<'_>,
    ) -> Result<String, AttemptError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                AttemptError::Retryable(AttemptOutcome::TransportFailure(format!(
                    "HTTP request failed: {e}"
                )))
            })?;

        let status = response.status();
        debug!(status = %status, "inference response received");

        if status == StatusCode::SERVICE_UNAVAILABLE {
            let warmup = response.json::<WarmupBody>().await.unwrap_or_default();
            if let Some(reason) = &warmup.error {
                debug!(reason = %reason, "model is loading");
            }
            return Err(AttemptError::Retryable(AttemptOutcome::WarmingUp {
                estimated_secs: warmup.estimated_time,
            }));
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AttemptError::Retryable(AttemptOutcome::TransportFailure(
                format!("HTTP {status}: {error_body}"),
            )));
        }

        let text = response.text().await.map_err(|e| {
            AttemptError::Retryable(AttemptOutcome::TransportFailure(format!(
                "failed to read response body: {e}"
            )))
        })?;

        extract_generated_text(&text).map_err(AttemptError::Malformed)
    }
}

impl InferenceBackend for HuggingFaceClient {
    fn name(&self) -> &str {
        genai_attrs::PROVIDER_HUGGING_FACE
    }

    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn generate(&self, text: &str) -> Result<String, InferenceFailure> {
        let Some(token) = &self.token else {
            return Err(InferenceFailure::MissingCredential);
        };

        let body = GenerationRequest::new(text, self.max_new_tokens);
        let span = info_span!(
            "gen_ai.generate",
            otel.name = %genai_attrs::span_name(genai_attrs::OP_TEXT_COMPLETION, &self.model),
            gen_ai.operation.name = genai_attrs::OP_TEXT_COMPLETION,
            gen_ai.provider.name = genai_attrs::PROVIDER_HUGGING_FACE,
            gen_ai.request.model = %self.model,
            gen_ai.request.max_tokens = self.max_new_tokens,
        );

        async {
            let max_attempts = self.policy.max_attempts();
            let mut attempt = 0;
            loop {
                attempt += 1;
                let outcome = match self.attempt(token, &body).await {
                    Ok(reply) => {
                        debug!(attempt, reply_len = reply.len(), "generation succeeded");
                        return Ok(reply);
                    }
                    Err(AttemptError::Malformed(reason)) => {
                        warn!(attempt, reason = %reason, "unexpected inference response format");
                        return Err(InferenceFailure::MalformedResponse(reason));
                    }
                    Err(AttemptError::Retryable(outcome)) => outcome,
                };

                match self.policy.decide(attempt, &outcome) {
                    RetryDecision::RetryAfter(wait) => {
                        match &outcome {
                            AttemptOutcome::WarmingUp { .. } => info!(
                                attempt,
                                max_attempts,
                                wait_secs = wait.as_secs_f64(),
                                "model is loading, retrying"
                            ),
                            AttemptOutcome::TransportFailure(message) => warn!(
                                attempt,
                                max_attempts,
                                error = %message,
                                "inference request failed, retrying"
                            ),
                        }
                        tokio::time::sleep(wait).await;
                    }
                    RetryDecision::GiveUp(failure) => {
                        warn!(attempt, error = %failure, "giving up on inference");
                        return Err(failure);
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
