//! Scripted transports for exercising the retry loop and everything built on it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use super::{GenerationRequest, LlmClient, LlmError, RetryPolicy, Transport};

/// What the fake upstream does on one attempt.
pub enum Reply {
    Body(String),
    Status(u16),
    /// Never answers; only the client timeout ends the attempt.
    Hang,
}

impl Reply {
    pub fn body(text: &str) -> Self {
        Reply::Body(text.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Call {
    pub request: GenerationRequest,
    pub at: Instant,
}

/// Plays back replies in order; once the script runs dry every attempt gets a 503.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A transport whose every attempt fails.
    pub fn failing() -> Arc<Self> {
        Self::new([])
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> GenerationRequest {
        self.calls().last().unwrap().request.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(Call {
            request: request.clone(),
            at: Instant::now(),
        });
        let reply = self.replies.lock().unwrap().pop_front();

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(LlmError::Status {
                status,
                body: String::new(),
            }),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(LlmError::Status {
                status: 503,
                body: "script exhausted".to_string(),
            }),
        }
    }
}

pub fn client_with(transport: Arc<ScriptedTransport>) -> LlmClient {
    LlmClient::new(transport, RetryPolicy::default())
}
