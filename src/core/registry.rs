//! # 서비스 레지스트리
//!
//! 애플리케이션 시작 시 모든 구성 요소를 생성하고 의존성을 연결합니다.
//!
//! ## 초기화 순서
//!
//! 1. **Store 먼저**: MongoDB 사용자 저장소(인덱스 생성), Redis 세션 저장소
//! 2. **Provider 다음**: 클라이언트 ID가 설정된 프로바이더만 어댑터 생성
//! 3. **Service 나중에**: 리컨실러 → 바인더 → 인증 플로우
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let registry = web::Data::new(ServiceRegistry::initialize_all(database, redis).await?);
//!
//! App::new()
//!     .app_data(registry.clone())
//!     .configure(configure_all_routes)
//! ```

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::config::{OAuthConfig, OAuthProviderConfig, SessionConfig};
use crate::db::Database;
use crate::errors::AppResult;
use crate::repositories::sessions::{PendingHandshakeStore, RedisSessionRepository, SessionStore};
use crate::repositories::users::{IdentityStore, MongoUserRepository};
use crate::services::auth::{AuthFlowService, OAuthProviderAdapter, ProviderAdapter, SessionBinder};
use crate::services::users::IdentityReconciler;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 요청 처리에 필요한 서비스 묶음
#[derive(Clone)]
pub struct ServiceRegistry {
    auth_flow: Arc<AuthFlowService>,
}

impl ServiceRegistry {
    pub fn new(auth_flow: Arc<AuthFlowService>) -> Self {
        Self { auth_flow }
    }

    /// 주어진 저장소와 어댑터로 서비스들을 조립합니다.
    ///
    /// 세션 수명과 state 유효 시간은 설정에서 읽습니다.
    pub fn assemble(
        identities: Arc<dyn IdentityStore>,
        sessions: Arc<dyn SessionStore>,
        pending: Arc<dyn PendingHandshakeStore>,
        adapters: Vec<Arc<dyn ProviderAdapter>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let reconciler = Arc::new(IdentityReconciler::new(identities.clone()));
        let binder = Arc::new(SessionBinder::new(
            sessions,
            identities,
            clock.clone(),
            SessionConfig::max_age_seconds(),
        ));

        let auth_flow = AuthFlowService::new(
            adapters,
            pending,
            reconciler,
            binder,
            clock,
            OAuthConfig::state_ttl_seconds(),
        );

        Self::new(Arc::new(auth_flow))
    }

    /// MongoDB/Redis 연결로 운영 구성 요소를 모두 생성합니다.
    pub async fn initialize_all(database: Arc<Database>, redis: Arc<RedisClient>) -> AppResult<Self> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        // 1단계: 저장소
        print_step_start(1, "Preparing stores");

        print_sub_task("MongoUserRepository", "Creating indexes...");
        let users = Arc::new(MongoUserRepository::new(database));
        users.init().await?;
        print_sub_task("MongoUserRepository", "✓ Ready");

        let sessions = Arc::new(RedisSessionRepository::new(redis));
        print_sub_task("RedisSessionRepository", "✓ Ready");

        print_step_complete(1, "Stores ready", 2);

        // 2단계: 프로바이더 어댑터
        print_step_start(2, "Configuring OAuth providers");

        let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();
        for config in OAuthProviderConfig::enabled() {
            let name = config.provider.as_str();
            adapters.push(Arc::new(OAuthProviderAdapter::new(config)?));
            print_sub_task(name, "✓ Enabled");
        }

        if adapters.is_empty() {
            log::warn!("설정된 OAuth 프로바이더가 없습니다. 로그인할 수 없습니다");
        }
        print_step_complete(2, "OAuth providers configured", adapters.len());

        // 3단계: 서비스
        print_step_start(3, "Wiring services");
        let registry = Self::assemble(
            users,
            sessions.clone(),
            sessions,
            adapters,
            Arc::new(SystemClock),
        );
        print_step_complete(3, "Services wired", 3);

        let providers: Vec<&str> = registry
            .auth_flow
            .enabled_providers()
            .iter()
            .map(|provider| provider.as_str())
            .collect();
        print_final_summary(2, &providers);

        Ok(registry)
    }

    pub fn auth_flow(&self) -> &AuthFlowService {
        &self.auth_flow
    }
}
