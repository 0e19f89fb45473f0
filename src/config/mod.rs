//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 단위 구조체의 연관 함수로 중앙집중식으로 제공합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, 프론트엔드, 환경, Rate Limiting 설정
//! - [`auth_config`] - OAuth 프로바이더, 세션 쿠키, 핸드셰이크 state 설정
//!
//! ## 설계 원칙
//!
//! ### 1. 환경 분리 (Environment Separation)
//!
//! `PROFILE` 값에 따라 `.env.dev` / `.env.prod` 파일을 로드하고,
//! 각 설정은 호출 시점에 환경 변수를 읽습니다.
//!
//! ### 2. 보안 우선 (Security First)
//!
//! - 클라이언트 시크릿은 환경 변수로만 제공
//! - 설정되지 않은 프로바이더는 자동으로 비활성화
//! - 세션 쿠키는 기본적으로 `Secure`, `HttpOnly`, `SameSite=None`
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{ServerConfig, SessionConfig, OAuthProviderConfig};
//!
//! let bind_address = ServerConfig::bind_address();
//! let max_age = SessionConfig::max_age_seconds();
//! let providers = OAuthProviderConfig::enabled();
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
