//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 1. 세션 미들웨어 (SessionMiddleware)
//! - 세션 쿠키(`sid`)에서 토큰 추출
//! - `ServiceRegistry`를 통해 사용자 해석
//! - 사용자 정보를 request extension에 저장 (현재 요청에만 유효)
//! - 선택적/강제 인증 모드 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::SessionMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(SessionMiddleware::required()) // 세션 필수
//!             .route("/me", web::get().to(me))
//!     )
//!     .service(
//!         web::scope("")
//!             .wrap(SessionMiddleware::optional()) // 익명 허용
//!             .route("/getuser", web::get().to(get_user))
//!     )
//! ```

pub mod session_middleware;
mod session_inner;

// 미들웨어 재export
pub use session_middleware::SessionMiddleware;
