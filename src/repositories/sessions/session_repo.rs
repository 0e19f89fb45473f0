//! # 세션 리포지토리 구현
//!
//! 세션 레코드는 토큰 해시 키 아래, 대기 중인 핸드셰이크는 OAuth `state` 키 아래 저장됩니다.
//!
//! ## 캐싱 정책
//!
//! - **세션 키**: `session:{sha256(token)}`, TTL = 세션의 남은 수명
//! - **state 키**: `oauth_state:{state}`, TTL = `OAUTH_STATE_TTL_SECONDS`
//! - state는 `GETDEL`로 읽어 한 번만 사용할 수 있습니다

use std::sync::Arc;

use async_trait::async_trait;

use crate::caching::redis::RedisClient;
use crate::domain::models::session::{PendingHandshake, SessionRecord};
use crate::errors::{AppError, AppResult};

/// 세션 레코드 저장소
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> AppResult<()>;

    async fn load(&self, key: &str) -> AppResult<Option<SessionRecord>>;

    /// 레코드 삭제. 없는 키를 삭제해도 성공입니다.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// 콜백을 기다리는 OAuth 핸드셰이크 저장소
#[async_trait]
pub trait PendingHandshakeStore: Send + Sync {
    async fn save_pending(
        &self,
        state: &str,
        pending: &PendingHandshake,
        ttl_seconds: u64,
    ) -> AppResult<()>;

    /// state에 해당하는 핸드셰이크를 꺼내면서 삭제합니다.
    async fn take_pending(&self, state: &str) -> AppResult<Option<PendingHandshake>>;
}

/// Redis 기반 세션/핸드셰이크 리포지토리
pub struct RedisSessionRepository {
    redis: Arc<RedisClient>,
}

impl RedisSessionRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionRepository {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> AppResult<()> {
        // Redis SETEX는 0초 TTL을 거부합니다
        self.redis
            .set_with_expiry(key, record, ttl_seconds.max(1))
            .await
            .map_err(redis_error)
    }

    async fn load(&self, key: &str) -> AppResult<Option<SessionRecord>> {
        self.redis.get::<SessionRecord>(key).await.map_err(redis_error)
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.redis.del(key).await.map_err(redis_error)
    }
}

#[async_trait]
impl PendingHandshakeStore for RedisSessionRepository {
    async fn save_pending(
        &self,
        state: &str,
        pending: &PendingHandshake,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        self.redis
            .set_with_expiry(&PendingHandshake::storage_key(state), pending, ttl_seconds.max(1))
            .await
            .map_err(redis_error)
    }

    async fn take_pending(&self, state: &str) -> AppResult<Option<PendingHandshake>> {
        self.redis
            .take::<PendingHandshake>(&PendingHandshake::storage_key(state))
            .await
            .map_err(redis_error)
    }
}
