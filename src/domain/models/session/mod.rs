//! # Session Models
//!
//! 서버 측 세션 상태 모델입니다.
//!
//! - [`SessionToken`]: 쿠키로 전달되는 불투명 토큰. 저장소 키는 토큰의 해시입니다.
//! - [`SessionRecord`]: 토큰 해시 아래 저장되는 내부 사용자 ID와 절대 만료 시각
//! - [`PendingHandshake`]: OAuth `state` 아래 저장되는 PKCE verifier (1회용)

pub mod session;

pub use session::{PendingHandshake, SessionRecord, SessionToken};
