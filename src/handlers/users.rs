//! 사용자 조회 핸들러
//!
//! 세션 미들웨어가 첨부한 사용자를 응답으로 변환합니다.

use actix_web::{get, HttpResponse};

use crate::domain::dto::users::UserResponse;
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};

/// 현재 세션의 사용자, 익명이면 `null`
///
/// # Endpoint
/// `GET /getuser`
#[get("")]
pub async fn get_user(user: OptionalUser) -> HttpResponse {
    let body = user.0.map(|authenticated| UserResponse::from(authenticated.user));
    HttpResponse::Ok().json(body)
}

/// 현재 세션의 사용자 (세션 필수)
///
/// # Endpoint
/// `GET /api/v1/me`
#[get("")]
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(user.user))
}
