//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! Client (SPA, http://localhost:3000)
//!          │ HTTP Request/Response (세션 쿠키 포함)
//!          ▼
//!   Handlers (이 모듈)          ← Web Layer
//!          │
//!   AuthFlowService             ← Service Layer
//!          │
//!   IdentityStore / SessionStore ← Repository Layer
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 로그인 시작, 프로바이더 콜백, 로그아웃, 로그인 실패 페이지
//! - [`users`] - 현재 사용자 조회
//!
//! 핸들러는 `web::Data<ServiceRegistry>`로 서비스에 접근합니다.

pub mod auth;
pub mod users;
