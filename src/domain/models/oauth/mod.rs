//! # OAuth Models
//!
//! 프로바이더 어댑터가 핸드셰이크를 마친 뒤 내놓는 결과 모델입니다.
//!
//! ```text
//! provider profile JSON ──▶ ProviderProfile ──▶ HandshakeResult::Success
//! 거부 / 교환 실패 / 프로필 누락 ──────────────▶ HandshakeResult::Failure
//! ```

pub mod handshake;
pub mod provider_profile;

pub use handshake::HandshakeResult;
pub use provider_profile::ProviderProfile;
