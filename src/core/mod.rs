//! # Core Module
//!
//! 애플리케이션 구성 요소의 조립을 담당합니다.
//!
//! ### [`registry`] - 서비스 레지스트리
//!
//! 저장소 구현, 프로바이더 어댑터, 서비스를 명시적으로 생성하여 하나의
//! [`ServiceRegistry`](registry::ServiceRegistry)로 묶습니다. 레지스트리는
//! `web::Data`로 actix 앱에 전달되며, 전역 상태는 두지 않습니다.
//!
//! ```text
//! Database ─▶ MongoUserRepository ──┐
//! RedisClient ─▶ RedisSessionRepository ─┼─▶ IdentityReconciler ─┐
//!                                   └─▶ SessionBinder ─────┼─▶ AuthFlowService
//! OAuthProviderConfig::enabled() ─▶ OAuthProviderAdapter ─────┘
//! ```

pub mod registry;
