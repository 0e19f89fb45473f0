//! 소셜 로그인 백엔드
//!
//! Google, Twitter, GitHub OAuth 로그인을 처리하고 서버 측 세션 쿠키로
//! 로그인 상태를 유지하는 Rust 기반 인증 서비스입니다.
//!
//! # Features
//!
//! - **OAuth 핸드셰이크**: 프로바이더별 인증 URL 생성, state/PKCE 검증, 코드 교환
//! - **아이덴티티 조정**: `(provider, external_id)` 당 정확히 하나의 사용자 보장
//! - **세션 바인딩**: 불투명 토큰 발급, 절대 만료, 로그아웃 시 즉시 폐기
//! - **MongoDB**: 사용자 문서 영구 저장 (프로바이더 ID별 유니크 인덱스)
//! - **Redis**: 세션 및 대기 중인 핸드셰이크 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /auth/{provider}, /getuser, /logout
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 쿠키 설정/삭제, 리다이렉트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ AuthFlowService │ ← 핸드셰이크 → 리컨실러 → 세션 바인더
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← IdentityStore / SessionStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use social_login_backend::core::registry::ServiceRegistry;
//!
//! let registry = ServiceRegistry::initialize_all(database, redis).await?;
//!
//! let url = registry.auth_flow().begin_login(AuthProvider::GitHub).await?;
//! // 사용자를 url 로 리다이렉트
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
mod test_support;
