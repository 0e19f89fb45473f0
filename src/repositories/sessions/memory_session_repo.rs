//! 프로세스 내 세션/핸드셰이크 저장소
//!
//! TTL은 저장만 하고 강제하지 않습니다. 만료 판정은 레코드의 절대 만료 시각으로
//! 서비스 계층에서 이루어집니다.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::models::session::{PendingHandshake, SessionRecord};
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::{PendingHandshakeStore, SessionStore};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionRecord>>,
    pending: Mutex<HashMap<String, PendingHandshake>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

fn poisoned() -> AppError {
    AppError::RedisError("in-memory session store lock poisoned".to_string())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, key: &str, record: &SessionRecord, _ttl_seconds: u64) -> AppResult<()> {
        self.sessions
            .lock()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), record.clone());
        Ok(())
    }

    async fn load(&self, key: &str) -> AppResult<Option<SessionRecord>> {
        Ok(self.sessions.lock().map_err(|_| poisoned())?.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.sessions.lock().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}

#[async_trait]
impl PendingHandshakeStore for InMemorySessionStore {
    async fn save_pending(
        &self,
        state: &str,
        pending: &PendingHandshake,
        _ttl_seconds: u64,
    ) -> AppResult<()> {
        self.pending
            .lock()
            .map_err(|_| poisoned())?
            .insert(state.to_string(), pending.clone());
        Ok(())
    }

    async fn take_pending(&self, state: &str) -> AppResult<Option<PendingHandshake>> {
        Ok(self.pending.lock().map_err(|_| poisoned())?.remove(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;

    #[actix_web::test]
    async fn test_session_save_load_remove() {
        let store = InMemorySessionStore::new();
        let record = SessionRecord::new("u1".to_string(), 0, 60);

        store.save("session:k", &record, 60).await.unwrap();
        assert_eq!(store.load("session:k").await.unwrap(), Some(record));

        store.remove("session:k").await.unwrap();
        assert!(store.load("session:k").await.unwrap().is_none());

        // 두 번째 삭제도 성공
        store.remove("session:k").await.unwrap();
    }

    #[actix_web::test]
    async fn test_pending_handshake_is_single_use() {
        let store = InMemorySessionStore::new();
        let pending = PendingHandshake {
            provider: AuthProvider::Google,
            pkce_verifier: "verifier".to_string(),
            expires_at: 600,
        };

        store.save_pending("state-1", &pending, 600).await.unwrap();

        assert_eq!(store.take_pending("state-1").await.unwrap(), Some(pending));
        assert!(store.take_pending("state-1").await.unwrap().is_none());
    }
}
