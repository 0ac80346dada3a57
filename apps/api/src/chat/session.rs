//! Chat session — a career-coach conversation over the shared `LlmClient`.
//!
//! The full transcript is kept for persistence, but only the system prompt plus the
//! last `CONTEXT_WINDOW` entries go out with each request.
//!
//! CALLER CONTRACT: one outstanding `send` per session. `send` takes `&mut self`, so
//! sharing a session across tasks needs a lock around it (see `ChatSessions`).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::{LlmClient, Message};

pub const CHAT_SYSTEM_PROMPT: &str = "Career Coach. Short answers only.";

/// Returned when the transport gives up. Never written to history.
pub const CHAT_FALLBACK_REPLY: &str =
    "I'm having a bit of trouble connecting. Please try asking again in a moment.";

/// History entries sent per call, in addition to the system prompt.
const CONTEXT_WINDOW: usize = 4;

/// `{message}` — the shape the browser client sends.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatInput {
    pub message: String,
}

/// `{text}` — the shape the browser client reads back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
}

pub struct ChatSession {
    llm: LlmClient,
    system: Message,
    history: Vec<Message>,
}

impl ChatSession {
    /// Starts from a restored transcript, or a fresh `[system]` history when none
    /// (or an empty one) is given.
    pub fn new(llm: LlmClient, restored: Option<Vec<Message>>) -> Self {
        let system = Message::system(CHAT_SYSTEM_PROMPT);
        let history = match restored {
            Some(history) if !history.is_empty() => history,
            _ => vec![system.clone()],
        };
        Self {
            llm,
            system,
            history,
        }
    }

    /// The full transcript, including the entry that opened the session.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// What the next call would send: the system prompt then the trailing window.
    pub fn context(&self) -> Vec<Message> {
        let start = self.history.len().saturating_sub(CONTEXT_WINDOW);
        std::iter::once(self.system.clone())
            .chain(self.history[start..].iter().cloned())
            .collect()
    }

    /// Records `text` as a user turn and returns the coach's reply.
    ///
    /// On failure the apology is returned but not recorded, so a retry sees the same
    /// trailing user turn.
    pub async fn send(&mut self, text: &str) -> String {
        self.history.push(Message::user(text));

        match self.llm.call(&self.context(), false).await {
            Ok(reply) => {
                debug!("Chat reply received ({} chars)", reply.len());
                self.history.push(Message::assistant(reply.clone()));
                reply
            }
            Err(e) => {
                warn!("Chat generation failed, sending apology: {e}");
                CHAT_FALLBACK_REPLY.to_string()
            }
        }
    }

    pub async fn send_message(&mut self, input: ChatInput) -> ChatReply {
        ChatReply {
            text: self.send(&input.message).await,
        }
    }
}
