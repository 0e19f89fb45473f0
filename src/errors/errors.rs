//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 소셜 로그인 백엔드를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패 |
//! | `NotFound` | 404 Not Found | 지원하지 않거나 비활성화된 프로바이더 |
//! | `HandshakeFailure` | 401 Unauthorized | 프로바이더 인증 거부/미완료 |
//! | `NotAuthenticated` | 401 Unauthorized | 유효한 세션 없음 |
//! | `ConflictError` | 409 Conflict | 외부 ID 중복 생성 시도 |
//! | `StoreUnavailable` | 503 Service Unavailable | 저장소 장애 (재시도 가능) |
//! | `DatabaseError` / `RedisError` / `InternalError` | 500 | 내부 오류 |
//!
//! 리포지토리 계층은 원시 `DatabaseError`, `RedisError`를 반환하고,
//! 서비스 계층(리컨실러/바인더)이 이를 `StoreUnavailable`로 변환한 뒤
//! 라우트 계층으로 전달합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! let user = identity_store.find_by_id(&user_id).await
//!     .map_err(AppError::into_store_fault)?;
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 같은 `(provider, external_id)` 쌍으로 이미 사용자가 생성된 경우입니다.
    /// 리컨실러는 이 에러를 받으면 조회를 다시 수행합니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// OAuth 핸드셰이크 실패 (401 Unauthorized)
    ///
    /// 사용자가 거부했거나, state가 유효하지 않거나, 프로바이더가 프로필을
    /// 돌려주지 않은 경우입니다. 사용자 생성도 세션 바인딩도 일어나지 않습니다.
    #[error("Handshake failure: {0}")]
    HandshakeFailure(String),

    /// 저장소 일시 장애 (503 Service Unavailable)
    ///
    /// MongoDB/Redis 장애를 서비스 경계에서 변환한 결과입니다.
    /// 전체 로그인 플로우를 다시 시도해도 안전합니다.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// 인증되지 않은 요청 (401 Unauthorized)
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 저장소 계층의 원시 에러를 `StoreUnavailable`로 변환합니다.
    ///
    /// 인프라 장애가 아닌 에러(충돌, 검증 실패 등)는 그대로 유지됩니다.
    pub fn into_store_fault(self) -> Self {
        match self {
            AppError::DatabaseError(msg) | AppError::RedisError(msg) => {
                AppError::StoreUnavailable(msg)
            }
            other => other,
        }
    }

    /// 인증 실패로 취급되어 실패 페이지로 리다이렉트해야 하는 에러인지 확인
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AppError::HandshakeFailure(_)
                | AppError::StoreUnavailable(_)
                | AppError::NotAuthenticated(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::HandshakeFailure(_) | AppError::NotAuthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 내부 정보를 노출하지 않도록 일반 메시지만 내려주고,
    /// 상세 내용은 서버 로그에만 기록합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
            "일시적인 서버 오류가 발생했습니다".to_string()
        } else {
            self.to_string()
        };

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": message
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("external id is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_handshake_failure_response() {
        let error = AppError::HandshakeFailure("access_denied".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_authenticated_response() {
        let error = AppError::NotAuthenticated("no session".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_response() {
        let error = AppError::NotFound("facebook".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("githubId 42".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_response() {
        let error = AppError::StoreUnavailable("connection refused".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_error_response() {
        let error = AppError::InternalError("Something went wrong".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_server_error_body_hides_details() {
        let error = AppError::DatabaseError("mongodb://admin:hunter2@db".to_string());
        let response = error.error_response();
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body is readable");

        assert!(!String::from_utf8_lossy(&bytes).contains("hunter2"));
    }

    #[test]
    fn test_into_store_fault() {
        assert!(matches!(
            AppError::DatabaseError("timeout".to_string()).into_store_fault(),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::RedisError("refused".to_string()).into_store_fault(),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::ConflictError("dup".to_string()).into_store_fault(),
            AppError::ConflictError(_)
        ));
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(AppError::HandshakeFailure("x".to_string()).is_authentication_failure());
        assert!(AppError::StoreUnavailable("x".to_string()).is_authentication_failure());
        assert!(!AppError::ValidationError("x".to_string()).is_authentication_failure());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        assert!(app_result.is_err());
        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
