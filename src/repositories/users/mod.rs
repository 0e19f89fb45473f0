//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`IdentityStore`] trait과 MongoDB 구현([`MongoUserRepository`]),
//! 인메모리 구현([`InMemoryIdentityStore`])을 제공합니다.

pub mod user_repo;
pub mod memory_user_repo;

pub use user_repo::{IdentityStore, MongoUserRepository};
pub use memory_user_repo::InMemoryIdentityStore;
