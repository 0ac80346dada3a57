// Career-coach chat: per-user sessions over the shared LlmClient.

pub mod handlers;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::chat::session::ChatSession;
use crate::llm_client::LlmClient;
use crate::store::{ProfileStore, StoreError};

/// Live sessions keyed by email.
///
/// Each session sits behind its own mutex, which serializes sends for one user
/// while leaving other users' sessions untouched.
#[derive(Default)]
pub struct ChatSessions {
    sessions: RwLock<HashMap<String, Arc<Mutex<ChatSession>>>>,
}

impl ChatSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live session for `email`, restoring it from the store on first use.
    ///
    /// A stored transcript that no longer parses is abandoned and the session starts
    /// fresh; the next save overwrites it. Backend failures still propagate.
    pub async fn get_or_restore(
        &self,
        email: &str,
        llm: &LlmClient,
        store: &dyn ProfileStore,
    ) -> Result<Arc<Mutex<ChatSession>>, StoreError> {
        if let Some(session) = self.sessions.read().await.get(email) {
            return Ok(session.clone());
        }

        let restored = match store.load_history(email).await {
            Ok(restored) => restored,
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("Discarding unreadable chat history for {email}: {e}");
                None
            }
            Err(e) => return Err(e),
        };
        info!(
            "Opening chat session for {email} ({} restored messages)",
            restored.as_ref().map_or(0, Vec::len)
        );

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ChatSession::new(llm.clone(), restored))));
        Ok(session.clone())
    }

    pub async fn get(&self, email: &str) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(email).cloned()
    }

    pub async fn remove(&self, email: &str) -> bool {
        self.sessions.write().await.remove(email).is_some()
    }
}
