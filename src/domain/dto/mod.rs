//! # DTO Module
//!
//! HTTP 계층의 요청/응답 계약입니다.
//!
//! | DTO | 방향 | 사용처 |
//! |-----|------|--------|
//! | [`UserResponse`] | 응답 | `GET /getuser`, `GET /api/v1/me` |
//! | [`OAuthCallbackQuery`] | 요청 (쿼리) | `GET /auth/{provider}/callback` |

pub mod users;
pub mod auth;

pub use users::*;
pub use auth::*;
