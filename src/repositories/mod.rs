//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 접근은 trait 뒤에 숨겨지고, 서비스는 `Arc<dyn Trait>`로 주입받습니다.
//! 운영 환경에서는 MongoDB/Redis 구현을, 테스트에서는 인메모리 구현을 사용합니다.
//!
//! | Trait | 운영 구현 | 인메모리 구현 |
//! |-------|-----------|---------------|
//! | [`IdentityStore`](users::IdentityStore) | `MongoUserRepository` | `InMemoryIdentityStore` |
//! | [`SessionStore`](sessions::SessionStore) | `RedisSessionRepository` | `InMemorySessionStore` |
//! | [`PendingHandshakeStore`](sessions::PendingHandshakeStore) | `RedisSessionRepository` | `InMemorySessionStore` |
//!
//! 리포지토리는 원시 `DatabaseError` / `RedisError`를 반환합니다.
//! 저장소 장애로의 변환은 서비스 계층에서 이루어집니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{IdentityStore, MongoUserRepository};
//!
//! let store: Arc<dyn IdentityStore> = Arc::new(MongoUserRepository::new(database));
//! store.init().await?;
//! let user = store.find_by_external_id(AuthProvider::GitHub, "42").await?;
//! ```

pub mod users;
pub mod sessions;
