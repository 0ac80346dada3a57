//! Persistence boundary — profiles, chat transcripts and premium flags keyed by email.
//!
//! The generation core never touches storage; handlers load and save through
//! `ProfileStore` and pass plain values in and out.
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`: `RedisStore` when `REDIS_URL` is
//! set, `MemoryStore` otherwise.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::Message;
use crate::models::profile::UserProfile;

pub mod memory;
pub mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt stored value under '{key}': {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn profile_key(email: &str) -> String {
    format!("app_profile_{email}")
}

pub fn chat_key(email: &str) -> String {
    format!("app_chat_{email}")
}

pub fn premium_key(email: &str) -> String {
    format!("app_premium_{email}")
}

/// Typed operations over a string key-value store.
///
/// Implementors only provide the three raw primitives; the typed helpers encode
/// values as JSON and are shared.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set_raw(&self, key: &str, value: String) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    async fn load_profile(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        load_json(self, &profile_key(email)).await
    }

    async fn save_profile(&self, email: &str, profile: &UserProfile) -> Result<(), StoreError> {
        self.set_raw(&profile_key(email), serde_json::to_string(profile)?)
            .await
    }

    async fn load_history(&self, email: &str) -> Result<Option<Vec<Message>>, StoreError> {
        load_json(self, &chat_key(email)).await
    }

    async fn save_history(&self, email: &str, history: &[Message]) -> Result<(), StoreError> {
        self.set_raw(&chat_key(email), serde_json::to_string(history)?)
            .await
    }

    async fn clear_history(&self, email: &str) -> Result<(), StoreError> {
        self.delete(&chat_key(email)).await
    }

    async fn is_premium(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.get_raw(&premium_key(email)).await?.as_deref() == Some("true"))
    }

    async fn set_premium(&self, email: &str, premium: bool) -> Result<(), StoreError> {
        let key = premium_key(email);
        if premium {
            self.set_raw(&key, "true".to_string()).await
        } else {
            self.delete(&key).await
        }
    }
}

async fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    S: ProfileStore + ?Sized,
    T: serde::de::DeserializeOwned,
{
    match store.get_raw(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}
