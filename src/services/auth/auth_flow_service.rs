//! # 인증 플로우 서비스
//!
//! 프로바이더 어댑터, 신원 리컨실러, 세션 바인더를 묶어 라우트 계층에
//! 로그인 시작, 콜백 처리, 현재 사용자 조회, 로그아웃을 제공합니다.
//!
//! ## 콜백 처리 순서
//!
//! 1. 프로바이더가 `error`를 보냈으면 실패
//! 2. `state`로 대기 중인 핸드셰이크를 꺼냄 (1회용, 프로바이더 일치, 만료 전)
//! 3. 어댑터로 코드 교환 및 프로필 조회 → [`HandshakeResult`]
//! 4. [`on_provider_callback`](AuthFlowService::on_provider_callback): 성공이면
//!    사용자 확정 후 세션 바인딩, 실패면 `HandshakeFailure`
//!
//! 실패한 콜백은 사용자를 만들지도 세션을 바인딩하지도 않습니다.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::AuthProvider;
use crate::domain::dto::auth::OAuthCallbackQuery;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::HandshakeResult;
use crate::domain::models::session::{PendingHandshake, SessionToken};
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::PendingHandshakeStore;
use crate::services::auth::{ProviderAdapter, SessionBinder};
use crate::services::users::IdentityReconciler;
use crate::utils::clock::Clock;

pub struct AuthFlowService {
    adapters: HashMap<AuthProvider, Arc<dyn ProviderAdapter>>,
    pending: Arc<dyn PendingHandshakeStore>,
    reconciler: Arc<IdentityReconciler>,
    binder: Arc<SessionBinder>,
    clock: Arc<dyn Clock>,
    state_ttl_seconds: i64,
}

impl AuthFlowService {
    pub fn new(
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        pending: Arc<dyn PendingHandshakeStore>,
        reconciler: Arc<IdentityReconciler>,
        binder: Arc<SessionBinder>,
        clock: Arc<dyn Clock>,
        state_ttl_seconds: i64,
    ) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.provider(), adapter))
            .collect();

        Self {
            adapters,
            pending,
            reconciler,
            binder,
            clock,
            state_ttl_seconds,
        }
    }

    /// 활성화된 프로바이더 목록 (고정 순서)
    pub fn enabled_providers(&self) -> Vec<AuthProvider> {
        AuthProvider::ALL
            .into_iter()
            .filter(|provider| self.adapters.contains_key(provider))
            .collect()
    }

    pub fn session_max_age_seconds(&self) -> i64 {
        self.binder.max_age_seconds()
    }

    fn adapter(&self, provider: AuthProvider) -> AppResult<&Arc<dyn ProviderAdapter>> {
        self.adapters
            .get(&provider)
            .ok_or_else(|| AppError::NotFound(format!("{} 로그인이 설정되지 않았습니다", provider)))
    }

    /// 로그인을 시작하고 프로바이더 인가 URL을 반환합니다.
    pub async fn begin_login(&self, provider: AuthProvider) -> AppResult<String> {
        let request = self.adapter(provider)?.authorization_request();

        let pending = PendingHandshake {
            provider,
            pkce_verifier: request.pkce_verifier,
            expires_at: self.clock.now().saturating_add(self.state_ttl_seconds),
        };

        self.pending
            .save_pending(&request.state, &pending, self.state_ttl_seconds.max(1) as u64)
            .await
            .map_err(AppError::into_store_fault)?;

        log::debug!("{} 로그인 시작", provider);
        Ok(request.url)
    }

    /// 프로바이더 콜백 쿼리를 검증하고 핸드셰이크를 완료합니다.
    pub async fn handle_callback(
        &self,
        provider: AuthProvider,
        query: &OAuthCallbackQuery,
    ) -> AppResult<(User, SessionToken)> {
        let adapter = self.adapter(provider)?;

        // 거부된 경우에도 state는 소비
        let pending = match query.state.as_deref() {
            Some(state) => self.pending
                .take_pending(state)
                .await
                .map_err(AppError::into_store_fault)?,
            None => None,
        };

        if let Some(error) = query.error.as_deref() {
            return self.on_provider_callback(provider, HandshakeResult::failure(error)).await;
        }

        let pending = pending
            .filter(|p| p.provider == provider)
            .ok_or_else(|| AppError::HandshakeFailure("유효하지 않은 state입니다".to_string()))?;

        if pending.is_expired(self.clock.now()) {
            return Err(AppError::HandshakeFailure("만료된 state입니다".to_string()));
        }

        let code = query
            .code
            .as_deref()
            .ok_or_else(|| AppError::HandshakeFailure("Authorization code가 없습니다".to_string()))?;

        let result = adapter.complete_handshake(code, &pending.pkce_verifier).await;
        self.on_provider_callback(provider, result).await
    }

    /// 핸드셰이크 결과를 사용자와 세션으로 변환합니다.
    pub async fn on_provider_callback(
        &self,
        provider: AuthProvider,
        result: HandshakeResult,
    ) -> AppResult<(User, SessionToken)> {
        match result {
            HandshakeResult::Success {
                external_id,
                display_name,
            } => {
                let user = self
                    .reconciler
                    .resolve_or_create(provider, &external_id, &display_name)
                    .await?;
                let token = self.binder.bind(&user).await?;

                log::info!(
                    "로그인 성공: {} via {}",
                    user.id_string().unwrap_or_default(),
                    provider
                );
                Ok((user, token))
            }
            HandshakeResult::Failure { reason } => {
                log::warn!("{} 핸드셰이크 실패: {}", provider, reason);
                Err(AppError::HandshakeFailure(reason))
            }
        }
    }

    /// 세션 토큰의 현재 사용자. `None`은 익명입니다.
    pub async fn current_user(&self, token: &SessionToken) -> AppResult<Option<User>> {
        self.binder.resolve(token).await
    }

    pub async fn logout(&self, token: &SessionToken) -> AppResult<()> {
        self.binder.unbind(token).await?;
        log::info!("로그아웃");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::sessions::InMemorySessionStore;
    use crate::repositories::users::InMemoryIdentityStore;
    use crate::test_support::{ScriptedAdapter, TestHarness};

    fn success(id: &str, name: &str) -> HandshakeResult {
        HandshakeResult::Success {
            external_id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    fn callback(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: error.map(str::to_string),
            error_description: None,
        }
    }

    fn state_of(url: &str) -> String {
        url.split("state=").nth(1).unwrap().split('&').next().unwrap().to_string()
    }

    #[actix_web::test]
    async fn test_login_bind_resolve_logout_scenario() {
        let harness = TestHarness::new(vec![ScriptedAdapter::new(AuthProvider::GitHub, success("42", "alice"))]);
        let flow = &harness.auth_flow;

        let (user, token) = flow
            .on_provider_callback(AuthProvider::GitHub, success("42", "alice"))
            .await
            .unwrap();
        assert_eq!(user.github_id.as_deref(), Some("42"));
        assert_eq!(user.username, "alice");

        let current = flow.current_user(&token).await.unwrap();
        assert_eq!(current.map(|u| u.id), Some(user.id));

        flow.logout(&token).await.unwrap();
        assert!(flow.current_user(&token).await.unwrap().is_none());

        // 재로그인은 같은 사용자
        let (again, _) = flow
            .on_provider_callback(AuthProvider::GitHub, success("42", "alice"))
            .await
            .unwrap();
        assert_eq!(again.id, user.id);
        assert_eq!(harness.identities.len(), 1);
    }

    #[actix_web::test]
    async fn test_failure_creates_nothing() {
        let harness = TestHarness::new(vec![]);

        let result = harness
            .auth_flow
            .on_provider_callback(AuthProvider::Google, HandshakeResult::failure("access_denied"))
            .await;

        assert!(matches!(result, Err(AppError::HandshakeFailure(_))));
        assert!(harness.identities.is_empty());
        assert_eq!(harness.sessions.session_count(), 0);
    }

    #[actix_web::test]
    async fn test_full_callback_with_valid_state() {
        let harness = TestHarness::new(vec![ScriptedAdapter::new(AuthProvider::Twitter, success("tw-9", "dev"))]);
        let flow = &harness.auth_flow;

        let url = flow.begin_login(AuthProvider::Twitter).await.unwrap();
        let state = state_of(&url);

        let (user, _) = flow
            .handle_callback(AuthProvider::Twitter, &callback(Some("code"), Some(&state), None))
            .await
            .unwrap();
        assert_eq!(user.twitter_id.as_deref(), Some("tw-9"));

        // state는 1회용
        let replay = flow
            .handle_callback(AuthProvider::Twitter, &callback(Some("code"), Some(&state), None))
            .await;
        assert!(matches!(replay, Err(AppError::HandshakeFailure(_))));
    }

    #[actix_web::test]
    async fn test_huge_state_ttl_does_not_overflow() {
        let harness = TestHarness::new(vec![]);
        let adapter: Arc<dyn ProviderAdapter> =
            Arc::new(ScriptedAdapter::new(AuthProvider::GitHub, success("42", "alice")));
        let flow = AuthFlowService::new(
            vec![adapter],
            harness.sessions.clone(),
            Arc::new(IdentityReconciler::new(harness.identities.clone())),
            harness.binder.clone(),
            harness.clock.clone(),
            i64::MAX,
        );

        let state = state_of(&flow.begin_login(AuthProvider::GitHub).await.unwrap());
        harness.clock.advance(TestHarness::STATE_TTL * 1_000);

        let (user, _) = flow
            .handle_callback(AuthProvider::GitHub, &callback(Some("code"), Some(&state), None))
            .await
            .unwrap();
        assert_eq!(user.github_id.as_deref(), Some("42"));
    }

    #[actix_web::test]
    async fn test_callback_rejects_unknown_state() {
        let harness = TestHarness::new(vec![ScriptedAdapter::new(AuthProvider::GitHub, success("1", "x"))]);

        let result = harness
            .auth_flow
            .handle_callback(AuthProvider::GitHub, &callback(Some("code"), Some("forged"), None))
            .await;

        assert!(matches!(result, Err(AppError::HandshakeFailure(_))));
        assert!(harness.identities.is_empty());
    }

    #[actix_web::test]
    async fn test_callback_rejects_state_from_other_provider() {
        let harness = TestHarness::new(vec![
            ScriptedAdapter::new(AuthProvider::GitHub, success("1", "x")),
            ScriptedAdapter::new(AuthProvider::Google, success("2", "y")),
        ]);
        let flow = &harness.auth_flow;

        let state = state_of(&flow.begin_login(AuthProvider::Google).await.unwrap());
        let result = flow
            .handle_callback(AuthProvider::GitHub, &callback(Some("code"), Some(&state), None))
            .await;

        assert!(matches!(result, Err(AppError::HandshakeFailure(_))));
    }

    #[actix_web::test]
    async fn test_callback_rejects_expired_state() {
        let harness = TestHarness::new(vec![ScriptedAdapter::new(AuthProvider::GitHub, success("1", "x"))]);
        let flow = &harness.auth_flow;

        let state = state_of(&flow.begin_login(AuthProvider::GitHub).await.unwrap());
        harness.clock.advance(TestHarness::STATE_TTL);

        let result = flow
            .handle_callback(AuthProvider::GitHub, &callback(Some("code"), Some(&state), None))
            .await;

        assert!(matches!(result, Err(AppError::HandshakeFailure(_))));
    }

    #[actix_web::test]
    async fn test_provider_error_is_handshake_failure() {
        let harness = TestHarness::new(vec![ScriptedAdapter::new(AuthProvider::GitHub, success("1", "x"))]);
        let flow = &harness.auth_flow;

        let state = state_of(&flow.begin_login(AuthProvider::GitHub).await.unwrap());
        let result = flow
            .handle_callback(AuthProvider::GitHub, &callback(None, Some(&state), Some("access_denied")))
            .await;

        assert!(matches!(result, Err(AppError::HandshakeFailure(_))));
        assert!(harness.identities.is_empty());
    }

    #[actix_web::test]
    async fn test_disabled_provider_is_not_found() {
        let harness = TestHarness::new(vec![]);

        let result = harness.auth_flow.begin_login(AuthProvider::Google).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(harness.auth_flow.enabled_providers().is_empty());
    }

    #[actix_web::test]
    async fn test_enabled_providers_in_fixed_order() {
        let flow = AuthFlowService::new(
            vec![
                Arc::new(ScriptedAdapter::new(AuthProvider::GitHub, success("1", "x"))),
                Arc::new(ScriptedAdapter::new(AuthProvider::Google, success("2", "y"))),
            ],
            Arc::new(InMemorySessionStore::new()),
            Arc::new(IdentityReconciler::new(Arc::new(InMemoryIdentityStore::new()))),
            TestHarness::new(vec![]).binder,
            Arc::new(crate::utils::clock::SystemClock),
            600,
        );

        assert_eq!(flow.enabled_providers(), vec![AuthProvider::Google, AuthProvider::GitHub]);
    }
}
