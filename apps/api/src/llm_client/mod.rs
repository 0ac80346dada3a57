/// LLM Client — the single point of entry for all text-generation calls in JobNexa.
///
/// ARCHITECTURAL RULE: No other module may talk to the completion endpoint directly.
/// All generation traffic MUST go through `LlmClient::call`.
///
/// The upstream service is free and unreliable: every attempt is bounded by a hard
/// timeout, bodies are sanity-checked, and failures are retried with exponential
/// backoff. Callers above this layer turn an exhausted `LlmError` into fallback content.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod validate;

#[cfg(test)]
pub mod testing;

use crate::llm_client::validate::validate_body;

/// Default completion endpoint. Plain-text responses, no auth.
pub const DEFAULT_ENDPOINT: &str = "https://text.pollinations.ai/";
/// The model tag sent with every request.
pub const MODEL: &str = "openai";
/// Seeds are drawn from `0..MAX_SEED`.
const MAX_SEED: u32 = 100_000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Malformed structured output: {0}")]
    MalformedStructuredOutput(String),
}

impl LlmError {
    /// True for failures of the round trip itself (timeout, network, status code).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout { .. } | LlmError::Http(_) | LlmError::Status { .. }
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Messages and wire request
// ────────────────────────────────────────────────────────────────────────────

/// Speaker of a chat message. Anything outside these three is rejected on deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Body of a single POST to the completion endpoint.
///
/// `messages` must be non-empty and should open with a system message;
/// callers own that rule, the transport does not check it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub seed: u32,
    pub json_mode: bool,
}

impl GenerationRequest {
    /// Builds a request with a freshly drawn seed.
    pub fn new(messages: Vec<Message>, json_mode: bool) -> Self {
        Self {
            messages,
            model: MODEL.to_string(),
            seed: rand::thread_rng().gen_range(0..MAX_SEED),
            json_mode,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Retry policy
// ────────────────────────────────────────────────────────────────────────────

/// Timeout and backoff knobs for `LlmClient::call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Hard bound on a single attempt.
    pub timeout: Duration,
    /// Retries after the first attempt. 2 means 3 attempts total.
    pub max_retries: u32,
    pub base_backoff: Duration,
    pub backoff_multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(25_000),
            max_retries: 2,
            base_backoff: Duration::from_millis(1_000),
            backoff_multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Delay slept after the failure of attempt `attempt` (0-based): base * multiplier^attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.base_backoff
            .saturating_mul(self.backoff_multiplier.saturating_pow(attempt))
    }

    /// The full sleep schedule between attempts, in order.
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_retries).map(|a| self.backoff_for(a)).collect()
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Transport
// ────────────────────────────────────────────────────────────────────────────

/// One round trip to the completion service. Returns the raw response body.
///
/// Implementations must not retry or time out on their own; `LlmClient` owns both.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// reqwest-backed transport for the public completion endpoint.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single generation client used by the façade and chat sessions.
#[derive(Clone)]
pub struct LlmClient {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl LlmClient {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Client against a real HTTP endpoint.
    pub fn http(endpoint: impl Into<String>, policy: RetryPolicy) -> Result<Self, LlmError> {
        Ok(Self::new(Arc::new(HttpTransport::new(endpoint)?), policy))
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Sends `messages` and returns the trimmed completion text.
    ///
    /// Every attempt uses a new seed. Any failure (timeout, network, status, bad body)
    /// is retried after `policy.backoff_for(attempt)` until the retry budget runs out;
    /// only then is the last error returned.
    pub async fn call(&self, messages: &[Message], json_mode: bool) -> Result<String, LlmError> {
        let mut attempt: u32 = 0;

        loop {
            let request = GenerationRequest::new(messages.to_vec(), json_mode);

            match self.attempt(&request).await {
                Ok(text) => {
                    debug!(
                        "Generation succeeded on attempt {}/{} ({} chars)",
                        attempt + 1,
                        self.policy.total_attempts(),
                        text.len()
                    );
                    return Ok(text);
                }
                Err(e) if attempt < self.policy.max_retries => {
                    let delay = self.policy.backoff_for(attempt);
                    warn!(
                        "Generation attempt {}/{} failed ({e}), retrying after {}ms...",
                        attempt + 1,
                        self.policy.total_attempts(),
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(
                        "Generation failed after {} attempts: {e}",
                        self.policy.total_attempts()
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = tokio::time::timeout(self.policy.timeout, self.transport.send(request))
            .await
            .map_err(|_| LlmError::Timeout {
                timeout_ms: self.policy.timeout.as_millis() as u64,
            })??;

        validate_body(&body).map(str::to_string)
    }
}
