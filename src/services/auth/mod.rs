//! 인증 및 세션 서비스 모듈
//!
//! OAuth 프로바이더 어댑터와 서버 측 세션 바인딩, 이를 묶는 인증 플로우를 제공합니다.
//!
//! # Security
//!
//! - CSRF 방지 (OAuth `state`, 1회용, 만료 시간 적용)
//! - PKCE (S256)
//! - 세션 토큰 원문은 저장하지 않음 (SHA-256 해시 키)
//! - 세션 절대 만료

pub mod provider_adapter;
pub mod session_binder;
pub mod auth_flow_service;

pub use provider_adapter::{AuthorizationRequest, OAuthProviderAdapter, ProviderAdapter};
pub use session_binder::SessionBinder;
pub use auth_flow_service::AuthFlowService;
