//! # Models Module
//!
//! 영속 엔티티가 아닌 인증 플로우 모델들입니다.
//!
//! - [`oauth`]: 프로바이더 핸드셰이크 결과와 프로필 매핑
//! - [`session`]: 세션 토큰, 세션 레코드, 대기 중인 핸드셰이크
//! - [`auth`]: 요청 컨텍스트에 첨부되는 인증 사용자와 인증 모드

pub mod oauth;
pub mod session;
pub mod auth;

pub use oauth::*;
pub use session::*;
pub use auth::*;
