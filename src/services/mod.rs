//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 trait 객체를 생성자로 주입받으며, 요청별 가변 상태를 갖지 않습니다.
//! 모든 서비스는 `Send + Sync`이고 `Arc`로 공유됩니다.
//!
//! # Features
//!
//! - 프로바이더 신원 → 내부 사용자 매핑 ([`IdentityReconciler`](users::IdentityReconciler))
//! - 서버 측 세션 바인딩 ([`SessionBinder`](auth::SessionBinder))
//! - OAuth 프로바이더 어댑터 ([`ProviderAdapter`](auth::ProviderAdapter))
//! - 로그인/콜백/로그아웃 플로우 ([`AuthFlowService`](auth::AuthFlowService))
//!
//! # Examples
//!
//! ```rust,ignore
//! let reconciler = Arc::new(IdentityReconciler::new(identity_store));
//! let binder = Arc::new(SessionBinder::new(session_store, identity_store, clock));
//!
//! let user = reconciler.resolve_or_create(AuthProvider::GitHub, "42", "alice").await?;
//! let token = binder.bind(&user).await?;
//! ```

pub mod users;
pub mod auth;
