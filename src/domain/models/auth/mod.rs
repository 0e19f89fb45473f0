//! # Auth Models
//!
//! 세션 미들웨어가 요청 extensions에 첨부하는 인증 사용자와,
//! 핸들러에서 이를 꺼내는 추출자들입니다.

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::{AuthenticatedUser, OptionalUser};
pub use authentication_request::AuthMode;
