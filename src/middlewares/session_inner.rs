//! SessionMiddleware 세션 해석 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::registry::ServiceRegistry;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser};
use crate::domain::models::session::SessionToken;
use crate::errors::{AppError, AppResult};

/// 실제 세션 해석을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;
        let cookie_name = self.cookie_name.clone();

        Box::pin(async move {
            let resolved = resolve_session(&req, &cookie_name).await;

            match (mode, resolved) {
                (_, Ok(Some(user))) => {
                    log::debug!("세션 해석 성공: 사용자 ID {}", user.user_id().unwrap_or_default());
                    req.extensions_mut().insert(user);
                },
                // Required 모드에서 세션 없음
                (AuthMode::Required, Ok(None)) => {
                    let response = AppError::NotAuthenticated("로그인이 필요합니다".to_string())
                        .error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                },
                // Required 모드에서 저장소 장애
                (AuthMode::Required, Err(err)) => {
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response)
                        .map_into_right_body();
                    return Ok(res);
                },
                (AuthMode::Optional, Ok(None)) => {
                    log::debug!("선택적 인증: 세션 없음, 요청 진행");
                },
                // Optional 모드에서 저장소 장애 (익명으로 진행)
                (AuthMode::Optional, Err(err)) => {
                    log::error!("세션 해석 실패, 익명으로 진행: {}", err);
                },
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청의 세션 쿠키를 사용자로 해석
async fn resolve_session(
    req: &ServiceRequest,
    cookie_name: &str,
) -> AppResult<Option<AuthenticatedUser>> {
    let Some(token) = req
        .cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .map(SessionToken::from_raw)
    else {
        return Ok(None);
    };

    let registry = req
        .app_data::<web::Data<ServiceRegistry>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("ServiceRegistry가 등록되지 않았습니다".to_string()))?;

    let user = registry.auth_flow().current_user(&token).await?;
    Ok(user.map(AuthenticatedUser::new))
}
