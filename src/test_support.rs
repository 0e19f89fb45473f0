//! 테스트 공용 구성 요소
//!
//! 인메모리 저장소와 정해진 결과를 돌려주는 프로바이더 어댑터로
//! 외부 서비스 없이 전체 플로우를 조립합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use uuid::Uuid;

use crate::config::AuthProvider;
use crate::core::registry::ServiceRegistry;
use crate::domain::entities::users::User;
use crate::domain::models::oauth::HandshakeResult;
use crate::domain::models::session::SessionRecord;
use crate::errors::{AppError, AppResult};
use crate::repositories::sessions::{InMemorySessionStore, SessionStore};
use crate::repositories::users::{IdentityStore, InMemoryIdentityStore};
use crate::services::auth::{AuthFlowService, AuthorizationRequest, ProviderAdapter, SessionBinder};
use crate::services::users::IdentityReconciler;
use crate::utils::clock::ManualClock;

/// 항상 같은 핸드셰이크 결과를 돌려주는 어댑터
pub struct ScriptedAdapter {
    provider: AuthProvider,
    result: HandshakeResult,
}

impl ScriptedAdapter {
    pub fn new(provider: AuthProvider, result: HandshakeResult) -> Self {
        Self { provider, result }
    }
}

#[async_trait]
impl ProviderAdapter for ScriptedAdapter {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let state = Uuid::new_v4().simple().to_string();

        AuthorizationRequest {
            url: format!("https://{}.example.com/authorize?state={}", self.provider, state),
            state,
            pkce_verifier: format!("verifier-{}", Uuid::new_v4().simple()),
        }
    }

    async fn complete_handshake(&self, _code: &str, _pkce_verifier: &str) -> HandshakeResult {
        self.result.clone()
    }
}

/// 인메모리 구성으로 조립된 서비스 묶음
pub struct TestHarness {
    pub registry: ServiceRegistry,
    pub auth_flow: Arc<AuthFlowService>,
    pub binder: Arc<SessionBinder>,
    pub identities: Arc<InMemoryIdentityStore>,
    pub sessions: Arc<InMemorySessionStore>,
    pub clock: Arc<ManualClock>,
}

impl TestHarness {
    pub const MAX_AGE: i64 = 604_800;
    pub const STATE_TTL: i64 = 600;

    pub fn new(adapters: Vec<ScriptedAdapter>) -> Self {
        Self::with_session_store(adapters, |sessions| sessions as Arc<dyn SessionStore>)
    }

    /// 바인더가 사용할 세션 저장소를 바꿔 끼웁니다. 핸드셰이크 저장소는 인메모리 그대로입니다.
    pub fn with_session_store(
        adapters: Vec<ScriptedAdapter>,
        wrap: impl FnOnce(Arc<InMemorySessionStore>) -> Arc<dyn SessionStore>,
    ) -> Self {
        let identities = Arc::new(InMemoryIdentityStore::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let clock = Arc::new(ManualClock::starting_at(1_700_000_000));

        let binder = Arc::new(SessionBinder::new(
            wrap(sessions.clone()),
            identities.clone(),
            clock.clone(),
            Self::MAX_AGE,
        ));
        let reconciler = Arc::new(IdentityReconciler::new(identities.clone()));

        let adapters = adapters
            .into_iter()
            .map(|adapter| Arc::new(adapter) as Arc<dyn ProviderAdapter>)
            .collect();

        let auth_flow = Arc::new(AuthFlowService::new(
            adapters,
            sessions.clone(),
            reconciler,
            binder.clone(),
            clock.clone(),
            Self::STATE_TTL,
        ));

        Self {
            registry: ServiceRegistry::new(auth_flow.clone()),
            auth_flow,
            binder,
            identities,
            sessions,
            clock,
        }
    }

    pub fn registry_data(&self) -> web::Data<ServiceRegistry> {
        web::Data::new(self.registry.clone())
    }
}

/// 모든 호출이 저장소 장애로 실패하는 사용자 저장소
pub struct FailingIdentityStore;

#[async_trait]
impl IdentityStore for FailingIdentityStore {
    async fn find_by_external_id(&self, _: AuthProvider, _: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_id(&self, _: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn insert(&self, _: User) -> AppResult<User> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn init(&self) -> AppResult<()> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}

/// 모든 호출이 저장소 장애로 실패하는 세션 저장소
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn save(&self, _: &str, _: &SessionRecord, _: u64) -> AppResult<()> {
        Err(AppError::RedisError("connection refused".to_string()))
    }

    async fn load(&self, _: &str) -> AppResult<Option<SessionRecord>> {
        Err(AppError::RedisError("connection refused".to_string()))
    }

    async fn remove(&self, _: &str) -> AppResult<()> {
        Err(AppError::RedisError("connection refused".to_string()))
    }
}

/// 저장과 조회는 되지만 삭제만 실패하는 세션 저장소
pub struct UndeletableSessionStore {
    inner: Arc<InMemorySessionStore>,
}

impl UndeletableSessionStore {
    pub fn new(inner: Arc<InMemorySessionStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SessionStore for UndeletableSessionStore {
    async fn save(&self, key: &str, record: &SessionRecord, ttl_seconds: u64) -> AppResult<()> {
        self.inner.save(key, record, ttl_seconds).await
    }

    async fn load(&self, key: &str) -> AppResult<Option<SessionRecord>> {
        self.inner.load(key).await
    }

    async fn remove(&self, _: &str) -> AppResult<()> {
        Err(AppError::RedisError("connection reset".to_string()))
    }
}

/// 첫 조회와 삽입 사이에 다른 요청이 같은 신원을 먼저 만든 상황을 재현합니다.
///
/// 삽입 시도 시 경쟁자의 레코드를 저장한 뒤 `ConflictError`를 반환합니다.
pub struct RacingIdentityStore {
    inner: InMemoryIdentityStore,
    winner: User,
    inserts: AtomicUsize,
}

impl RacingIdentityStore {
    pub fn new(provider: AuthProvider, external_id: &str, winner_name: &str) -> Self {
        Self {
            inner: InMemoryIdentityStore::new(),
            winner: User::new_from_provider(provider, external_id, winner_name),
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityStore for RacingIdentityStore {
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<User>> {
        self.inner.find_by_external_id(provider, external_id).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, _: User) -> AppResult<User> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(self.winner.clone()).await?;
        Err(AppError::ConflictError("duplicate key".to_string()))
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}
