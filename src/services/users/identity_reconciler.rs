//! # 신원 리컨실러
//!
//! 프로바이더가 돌려준 외부 신원을 내부 사용자 레코드로 매핑합니다.
//!
//! ```text
//! resolve_or_create(provider, external_id, display_name)
//!   ├─ find_by_external_id ── Some(user) ──▶ 그대로 반환
//!   └─ None ─▶ insert(new user)
//!                ├─ Ok(user) ──────────────▶ 반환
//!                └─ ConflictError ─▶ find_by_external_id 재조회 ─▶ 반환
//! ```
//!
//! 동시에 같은 신원으로 생성이 시도되면 저장소의 unique 인덱스가 하나만 통과시키고,
//! 나머지는 충돌 후 재조회로 같은 레코드를 받습니다. 프로세스 내 잠금은 없습니다.

use std::sync::Arc;

use crate::config::AuthProvider;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::IdentityStore;
use crate::utils::string_utils::validate_required_string;

pub struct IdentityReconciler {
    store: Arc<dyn IdentityStore>,
}

impl IdentityReconciler {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store }
    }

    /// 외부 신원에 해당하는 사용자를 찾거나 새로 만듭니다.
    ///
    /// 기존 사용자의 `username`은 갱신하지 않습니다 (최초 값 유지).
    ///
    /// # Errors
    ///
    /// * `ValidationError` - `external_id`가 비어 있음
    /// * `StoreUnavailable` - 저장소 장애
    pub async fn resolve_or_create(
        &self,
        provider: AuthProvider,
        external_id: &str,
        display_name: &str,
    ) -> AppResult<User> {
        let external_id = validate_required_string(external_id, "external_id")?;

        if let Some(user) = self.find(provider, &external_id).await? {
            log::debug!("기존 사용자 매칭: {} {}", provider, external_id);
            return Ok(user);
        }

        let candidate = User::new_from_provider(provider, &external_id, display_name);

        match self.store.insert(candidate).await {
            Ok(user) => {
                log::info!(
                    "새 사용자 생성: {} ({} {})",
                    user.id_string().unwrap_or_default(),
                    provider,
                    external_id
                );
                Ok(user)
            }
            Err(AppError::ConflictError(_)) => {
                log::debug!("동시 생성 감지, 재조회: {} {}", provider, external_id);

                self.find(provider, &external_id).await?.ok_or_else(|| {
                    AppError::StoreUnavailable(format!(
                        "충돌 후 재조회 실패: {} {}",
                        provider, external_id
                    ))
                })
            }
            Err(e) => Err(e.into_store_fault()),
        }
    }

    async fn find(&self, provider: AuthProvider, external_id: &str) -> AppResult<Option<User>> {
        self.store
            .find_by_external_id(provider, external_id)
            .await
            .map_err(AppError::into_store_fault)
    }
}
