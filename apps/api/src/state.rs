use std::sync::Arc;

use crate::chat::ChatSessions;
use crate::generation::generator::ContentGenerator;
use crate::llm_client::LlmClient;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub generator: ContentGenerator,
    /// Pluggable persistence. Default: MemoryStore. RedisStore when REDIS_URL is set.
    pub store: Arc<dyn ProfileStore>,
    pub sessions: Arc<ChatSessions>,
}

impl AppState {
    pub fn new(llm: LlmClient, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            generator: ContentGenerator::new(llm.clone()),
            llm,
            store,
            sessions: Arc::new(ChatSessions::new()),
        }
    }
}
