//! 세션 및 OAuth 핸드셰이크 state 저장소 모듈
//!
//! 두 저장소 모두 TTL이 있는 키-값 저장소로, 운영 환경에서는 Redis를 사용합니다.

pub mod session_repo;
pub mod memory_session_repo;

pub use session_repo::{PendingHandshakeStore, RedisSessionRepository, SessionStore};
pub use memory_session_repo::InMemorySessionStore;
