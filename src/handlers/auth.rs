//! Authentication HTTP Handlers
//!
//! OAuth 로그인 시작과 콜백, 로그아웃을 처리하는 핸들러 함수들입니다.
//!
//! # Endpoints
//!
//! - `GET /auth/{provider}` - 프로바이더 인가 페이지로 302
//! - `GET /auth/{provider}/callback` - 세션 쿠키 설정 후 프론트엔드로 302
//! - `GET /logout` - 세션 해제, `done` 응답
//! - `GET /login` - 로그인 실패 랜딩 (401)
use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use validator::Validate;

use crate::config::{AuthProvider, FrontendConfig, SessionConfig};
use crate::core::registry::ServiceRegistry;
use crate::domain::dto::auth::OAuthCallbackQuery;
use crate::domain::models::session::SessionToken;
use crate::errors::{AppError, AppResult};

fn parse_provider(raw: &str) -> AppResult<AuthProvider> {
    AuthProvider::from_str(raw).map_err(AppError::NotFound)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn session_cookie(value: String, max_age_seconds: i64) -> Cookie<'static> {
    build_session_cookie(
        SessionConfig::cookie_name(),
        value,
        max_age_seconds,
        SessionConfig::cookie_secure(),
    )
}

// 브라우저는 Secure 없는 SameSite=None 쿠키를 거부함
fn build_session_cookie(name: String, value: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    let same_site = if secure { SameSite::None } else { SameSite::Lax };

    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(same_site)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// OAuth 로그인 시작 핸들러
///
/// # Endpoint
/// `GET /auth/{provider}`
#[get("/{provider}")]
pub async fn begin_login(
    registry: web::Data<ServiceRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;
    let url = registry.auth_flow().begin_login(provider).await?;

    Ok(redirect(&url))
}

/// OAuth 콜백 처리 핸들러
///
/// 성공하면 세션 쿠키를 설정하고 프론트엔드로, 실패하면 실패 경로로 리다이렉트합니다.
/// 실패 사유는 응답에 포함하지 않습니다.
///
/// # Endpoint
/// `GET /auth/{provider}/callback?code={code}&state={state}`
#[get("/{provider}/callback")]
pub async fn provider_callback(
    registry: web::Data<ServiceRegistry>,
    path: web::Path<String>,
    query: Result<web::Query<OAuthCallbackQuery>, actix_web::Error>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&path)?;

    let outcome = match query {
        Ok(query) => {
            if let Some(description) = query.error_description.as_deref() {
                log::debug!("{} 콜백 에러 설명: {}", provider, description);
            }

            match query.validate() {
                Ok(()) => registry.auth_flow().handle_callback(provider, &query).await,
                Err(e) => Err(AppError::ValidationError(e.to_string())),
            }
        }
        Err(e) => Err(AppError::ValidationError(format!("잘못된 콜백 쿼리: {}", e))),
    };

    match outcome {
        Ok((_, token)) => {
            let max_age = registry.auth_flow().session_max_age_seconds();

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, FrontendConfig::success_redirect()))
                .cookie(session_cookie(token.as_str().to_string(), max_age))
                .finish())
        }
        Err(e) => {
            if e.is_authentication_failure() {
                log::warn!("{} 로그인 실패: {}", provider, e);
            } else {
                log::error!("{} 로그인 처리 오류: {}", provider, e);
            }
            Ok(redirect(&FrontendConfig::failure_redirect()))
        }
    }
}

/// 로그아웃 핸들러
///
/// 세션이 없어도 `done`을 응답합니다. 세션 저장소 장애로 바인딩을 해제하지 못하면
/// 쿠키는 지우되 503을 응답합니다.
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout(
    registry: web::Data<ServiceRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    let cookie_name = SessionConfig::cookie_name();
    let mut removal = session_cookie(String::new(), 0);
    removal.make_removal();

    if let Some(cookie) = req.cookie(&cookie_name).filter(|c| !c.value().is_empty()) {
        let token = SessionToken::from_raw(cookie.value());
        if let Err(e) = registry.auth_flow().logout(&token).await {
            log::error!("세션 해제 실패: {}", e);

            let mut response = e.error_response();
            if let Err(e) = response.add_cookie(&removal) {
                log::error!("세션 쿠키 삭제 헤더 생성 실패: {}", e);
            }
            return response;
        }
    }

    HttpResponse::Ok()
        .cookie(removal)
        .content_type("text/plain; charset=utf-8")
        .body("done")
}

/// 로그인 실패 랜딩
///
/// # Endpoint
/// `GET /login`
#[get("/login")]
pub async fn login_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "error": "login_failed",
        "message": "로그인에 실패했습니다. 다시 시도해주세요"
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::{Cookie, SameSite};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    use super::build_session_cookie;
    use crate::config::AuthProvider;
    use crate::domain::models::oauth::HandshakeResult;
    use crate::repositories::sessions::SessionStore;
    use crate::routes::configure_all_routes;
    use crate::test_support::{ScriptedAdapter, TestHarness, UndeletableSessionStore};

    fn github_alice() -> ScriptedAdapter {
        ScriptedAdapter::new(
            AuthProvider::GitHub,
            HandshakeResult::Success {
                external_id: "42".to_string(),
                display_name: "alice".to_string(),
            },
        )
    }

    fn location(res: &actix_web::dev::ServiceResponse) -> String {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[actix_web::test]
    async fn test_login_redirects_to_provider() {
        let harness = TestHarness::new(vec![github_alice()]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/github").to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert!(location(&res).starts_with("https://github.example.com/authorize?state="));
    }

    #[actix_web::test]
    async fn test_unknown_or_disabled_provider_is_404() {
        let harness = TestHarness::new(vec![github_alice()]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/facebook").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/google").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_callback_sets_cookie_and_getuser_logout_roundtrip() {
        let harness = TestHarness::new(vec![github_alice()]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        // 로그인 시작
        let res = test::call_service(&app, test::TestRequest::get().uri("/auth/github").to_request()).await;
        let provider_url = location(&res);
        let state = provider_url.split("state=").nth(1).unwrap().to_string();

        // 콜백
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/auth/github/callback?code=abc&state={}", state))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "http://localhost:3000");

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == "sid")
            .expect("session cookie is set")
            .into_owned();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age().map(|d| d.whole_seconds()), Some(TestHarness::MAX_AGE));

        // 현재 사용자
        let req = test::TestRequest::get()
            .uri("/getuser")
            .cookie(Cookie::new("sid", cookie.value().to_string()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["githubId"], "42");
        assert_eq!(body["username"], "alice");

        // 로그아웃
        let req = test::TestRequest::get()
            .uri("/logout")
            .cookie(Cookie::new("sid", cookie.value().to_string()))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "done");

        // 로그아웃 이후 익명
        let req = test::TestRequest::get()
            .uri("/getuser")
            .cookie(Cookie::new("sid", cookie.value().to_string()))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_null());
    }

    #[actix_web::test]
    async fn test_failed_callback_redirects_without_cookie() {
        let harness = TestHarness::new(vec![github_alice()]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/github/callback?error=access_denied&error_description=User+denied")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
        assert!(res.response().cookies().all(|c| c.name() != "sid"));
        assert!(harness.identities.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_callback_query_redirects_to_failure() {
        let harness = TestHarness::new(vec![github_alice()]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/github/callback?code=a&state=x&state=y")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
        assert!(harness.identities.is_empty());
    }

    #[actix_web::test]
    async fn test_logout_store_fault_is_503_and_still_clears_cookie() {
        let harness = TestHarness::with_session_store(vec![], |sessions| {
            Arc::new(UndeletableSessionStore::new(sessions)) as Arc<dyn SessionStore>
        });
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let (_, token) = harness
            .auth_flow
            .on_provider_callback(
                AuthProvider::GitHub,
                HandshakeResult::Success {
                    external_id: "42".to_string(),
                    display_name: "alice".to_string(),
                },
            )
            .await
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/logout")
            .cookie(Cookie::new("sid", token.as_str().to_string()))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let removal = res
            .response()
            .cookies()
            .find(|c| c.name() == "sid")
            .expect("removal cookie is set")
            .into_owned();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age().map(|d| d.whole_seconds()), Some(0));

        let body = test::read_body(res).await;
        assert_ne!(body, "done");
        // 세션이 남아 있으므로 성공으로 응답하지 않음
        assert!(harness.auth_flow.current_user(&token).await.unwrap().is_some());
    }

    #[::core::prelude::v1::test]
    fn test_cookie_same_site_follows_secure_flag() {
        let secure = build_session_cookie("sid".to_string(), "v".to_string(), 60, true);
        assert_eq!(secure.secure(), Some(true));
        assert_eq!(secure.same_site(), Some(SameSite::None));

        let insecure = build_session_cookie("sid".to_string(), "v".to_string(), 60, false);
        assert_eq!(insecure.secure(), Some(false));
        assert_eq!(insecure.same_site(), Some(SameSite::Lax));
    }

    #[actix_web::test]
    async fn test_logout_without_session_is_done() {
        let harness = TestHarness::new(vec![]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/logout").to_request()).await;
        assert_eq!(body, "done");
    }

    #[actix_web::test]
    async fn test_login_landing_is_401() {
        let harness = TestHarness::new(vec![]);
        let app = test::init_service(
            App::new().app_data(harness.registry_data()).configure(configure_all_routes),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
