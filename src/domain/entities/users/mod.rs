//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AuthProvider;
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_from_provider(AuthProvider::GitHub, "42", "alice");
//! assert_eq!(user.external_id(AuthProvider::GitHub), Some("42"));
//! ```

pub mod user;

pub use user::User;
