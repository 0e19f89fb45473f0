//! API 라우트 설정 모듈
//!
//! 엔드포인트들을 기능별로 그룹화하고 세션 미들웨어를 범위별로 적용합니다.
//!
//! | Method | Path | 세션 | 핸들러 |
//! |--------|------|------|--------|
//! | GET | `/` | - | [`index`] |
//! | GET | `/health` | - | [`health_check`] |
//! | GET | `/auth/{provider}` | - | [`handlers::auth::begin_login`] |
//! | GET | `/auth/{provider}/callback` | - | [`handlers::auth::provider_callback`] |
//! | GET | `/logout` | - | [`handlers::auth::logout`] |
//! | GET | `/login` | - | [`handlers::auth::login_failed`] |
//! | GET | `/getuser` | Optional | [`handlers::users::get_user`] |
//! | GET | `/api/v1/me` | Required | [`handlers::users::me`] |

use crate::config::Environment;
use crate::core::registry::ServiceRegistry;
use crate::handlers;
use crate::middlewares::SessionMiddleware;
use actix_web::{get, web, HttpResponse};
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index);

    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::provider_callback)
            .service(handlers::auth::begin_login)
    );

    cfg.service(handlers::auth::logout);
    cfg.service(handlers::auth::login_failed);
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    // 익명 허용 - 세션이 없으면 null
    cfg.service(
        web::scope("/getuser")
            .wrap(SessionMiddleware::optional())
            .service(handlers::users::get_user)
    );

    // Protected routes
    cfg.service(
        web::scope("/api/v1/me")
            .wrap(SessionMiddleware::required())
            .service(handlers::users::me)
    );
}

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello World")
}

#[get("/health")]
async fn health_check(registry: Option<web::Data<ServiceRegistry>>) -> HttpResponse {
    let providers: Vec<&str> = registry
        .map(|registry| {
            registry
                .auth_flow()
                .enabled_providers()
                .into_iter()
                .map(|provider| provider.as_str())
                .collect()
        })
        .unwrap_or_default();

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_login_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": format!("{:?}", Environment::current()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "session_store": "Redis",
            "providers": providers
        }
    }))
}
