//! 세션 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 세션 쿠키를 해석하고 사용자 정보를 요청에 첨부합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::config::SessionConfig;
use crate::domain::models::auth::AuthMode;
use crate::middlewares::session_inner::SessionMiddlewareService;

/// 세션 미들웨어
pub struct SessionMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 세션 쿠키 이름
    cookie_name: Rc<str>,
}

impl SessionMiddleware {
    /// 새로운 세션 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            cookie_name: SessionConfig::cookie_name().into(),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
            cookie_name: self.cookie_name.clone(),
        }))
    }
}
