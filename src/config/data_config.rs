//! 데이터 및 서버 설정 관리 모듈
//!
//! 서버 바인딩, 프론트엔드 연동, 환경 및 Rate Limiting 관련 설정을 관리합니다.

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 환경 변수로 현재 환경을 결정합니다.
    pub fn current() -> Self {
        Self::from_str(
            &env::var("ENVIRONMENT")
                .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string())),
        )
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .unwrap_or(4000)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// 외부에서 접근 가능한 이 서버의 기본 URL
    ///
    /// OAuth 콜백 URI의 기본값을 만들 때 사용됩니다.
    pub fn public_base_url() -> String {
        env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{}", Self::port()))
    }
}

/// 싱글 페이지 프론트엔드 연동 설정
pub struct FrontendConfig;

impl FrontendConfig {
    /// CORS 허용 Origin (자격 증명 포함)
    pub fn origin() -> String {
        env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }

    /// 로그인 성공 후 리다이렉트할 주소
    pub fn success_redirect() -> String {
        env::var("AUTH_SUCCESS_REDIRECT").unwrap_or_else(|_| Self::origin())
    }

    /// 로그인 실패 시 리다이렉트할 주소
    pub fn failure_redirect() -> String {
        env::var("AUTH_FAILURE_REDIRECT").unwrap_or_else(|_| "/login".to_string())
    }
}

/// Rate Limiting 설정 구조체
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn load() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        let config = Self {
            per_second,
            burst_size,
        };

        log::info!("Rate Limiting 설정 로드됨: {:?}", config);
        config
    }
}
