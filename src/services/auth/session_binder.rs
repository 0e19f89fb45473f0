//! # 세션 바인더
//!
//! 로그인 시 사용자의 내부 ID를 서버 측 세션에 저장하고,
//! 이후 요청마다 세션 토큰을 전체 사용자 레코드로 해석합니다.
//!
//! ```text
//! Anonymous ─(bind)─▶ Authenticated ─(resolve)*─▶ Authenticated
//!                            │
//!                            └─(unbind | 만료)─▶ Anonymous
//! ```
//!
//! 세션 수명은 발급 시점부터의 절대 시간이며, 요청이 있어도 연장되지 않습니다.

use std::sync::Arc;

use crate::domain::entities::users::User;
use crate::domain::models::session::{SessionRecord, SessionToken};
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::SessionStore;
use crate::repositories::users::IdentityStore;
use crate::utils::clock::Clock;

pub struct SessionBinder {
    sessions: Arc<dyn SessionStore>,
    identities: Arc<dyn IdentityStore>,
    clock: Arc<dyn Clock>,
    max_age_seconds: i64,
}

impl SessionBinder {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        identities: Arc<dyn IdentityStore>,
        clock: Arc<dyn Clock>,
        max_age_seconds: i64,
    ) -> Self {
        Self {
            sessions,
            identities,
            clock,
            max_age_seconds,
        }
    }

    pub fn max_age_seconds(&self) -> i64 {
        self.max_age_seconds
    }

    /// 사용자를 새 세션에 바인딩하고 토큰을 발급합니다.
    pub async fn bind(&self, user: &User) -> AppResult<SessionToken> {
        let user_id = user.id_string().ok_or_else(|| {
            AppError::InternalError("내부 ID가 없는 사용자는 세션에 바인딩할 수 없습니다".to_string())
        })?;

        let now = self.clock.now();
        let record = SessionRecord::new(user_id, now, self.max_age_seconds);
        let token = SessionToken::generate();

        self.sessions
            .save(&token.storage_key(), &record, record.remaining_seconds(now))
            .await
            .map_err(AppError::into_store_fault)?;

        log::info!("세션 바인딩: 사용자 {}", record.user_id);
        Ok(token)
    }

    /// 세션 토큰을 사용자 레코드로 해석합니다.
    ///
    /// `None`은 인증되지 않은 상태를 뜻합니다. 만료되었거나 사용자가 사라진
    /// 세션 레코드는 이 시점에 제거됩니다.
    pub async fn resolve(&self, token: &SessionToken) -> AppResult<Option<User>> {
        let key = token.storage_key();

        let Some(record) = self.sessions.load(&key).await.map_err(AppError::into_store_fault)? else {
            return Ok(None);
        };

        if record.is_expired(self.clock.now()) {
            log::debug!("만료된 세션: 사용자 {}", record.user_id);
            self.revoke(&key).await;
            return Ok(None);
        }

        let user = self
            .identities
            .find_by_id(&record.user_id)
            .await
            .map_err(AppError::into_store_fault)?;

        if user.is_none() {
            log::warn!("세션이 존재하지 않는 사용자를 가리킴: {}", record.user_id);
            self.revoke(&key).await;
        }

        Ok(user)
    }

    /// 세션 바인딩을 해제합니다. 없는 세션에 대해서도 성공합니다.
    pub async fn unbind(&self, token: &SessionToken) -> AppResult<()> {
        self.sessions
            .remove(&token.storage_key())
            .await
            .map_err(AppError::into_store_fault)
    }

    // 해석 결과는 이미 None으로 확정되었으므로 정리 실패는 로그만 남김
    async fn revoke(&self, key: &str) {
        if let Err(e) = self.sessions.remove(key).await {
            log::error!("세션 정리 실패: {}", e);
        }
    }
}
