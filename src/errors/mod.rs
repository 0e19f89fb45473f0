//! 에러 처리 모듈
//!
//! [`AppError`](errors::AppError)와 `AppResult` 별칭을 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
