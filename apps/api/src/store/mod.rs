//! Durable session storage behind a load/save trait. The service keeps its
//! own in-process registry as the fast path; a store implementation only
//! needs keyed load/save/delete semantics.

pub mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::session::SessionState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Keyed durable storage for session state.
///
/// Implementations are swapped at startup; callers never see which backend
/// is behind the trait.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, StoreError>;
    async fn save(&self, token: &str, state: &SessionState) -> Result<(), StoreError>;
    async fn delete(&self, token: &str) -> Result<(), StoreError>;
}

/// In-memory store. Used by tests, and usable as a standalone backend for
/// deployments that accept losing sessions on restart.
#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, SessionState>>,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, token: &str) -> Result<Option<SessionState>, StoreError> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn save(&self, token: &str, state: &SessionState) -> Result<(), StoreError> {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), state.clone());
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), StoreError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        let mut state = SessionState::new(Utc::now());
        state.answers.insert("q_1".to_string(), "hello there".to_string());

        store.save("tok", &state).await.unwrap();
        let loaded = store.load("tok").await.unwrap().unwrap();
        assert_eq!(loaded.answers, state.answers);
        assert_eq!(loaded.created_at, state.created_at);

        store.delete("tok").await.unwrap();
        assert!(store.load("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_unknown_token_is_absent() {
        let store = MemoryStore::default();
        assert!(store.load("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_save_overwrites() {
        let store = MemoryStore::default();
        let mut state = SessionState::new(Utc::now());
        store.save("tok", &state).await.unwrap();

        state.completed = true;
        store.save("tok", &state).await.unwrap();
        assert!(store.load("tok").await.unwrap().unwrap().completed);
    }
}
