//! # Authentication Configuration Module
//!
//! OAuth 프로바이더, 세션 쿠키, 핸드셰이크 state 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **Google OAuth 2.0**: OpenID Connect userinfo 기반
//! 2. **Twitter OAuth 2.0**: PKCE 기반 (`users/me`)
//! 3. **GitHub OAuth**: `api.github.com/user` 기반
//!
//! 클라이언트 ID가 설정되지 않은 프로바이더는 비활성화됩니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export TWITTER_CLIENT_ID="your-twitter-client-id"
//! export TWITTER_CLIENT_SECRET="your-twitter-client-secret"
//! export GITHUB_CLIENT_ID="your-github-client-id"
//! export GITHUB_CLIENT_SECRET="your-github-client-secret"
//! ```
//!
//! ### 선택 환경 변수
//!
//! ```bash
//! # 기본값: {PUBLIC_BASE_URL}/auth/{provider}/callback
//! export GITHUB_REDIRECT_URI="https://api.example.com/auth/github/callback"
//!
//! # 세션
//! export SESSION_COOKIE_NAME="sid"
//! export SESSION_MAX_AGE_SECONDS="604800"   # 1주일
//! export SESSION_COOKIE_SECURE="true"
//!
//! # OAuth state 유효 시간
//! export OAUTH_STATE_TTL_SECONDS="600"
//! ```

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ServerConfig;

/// 지원하는 OAuth 프로바이더
///
/// 각 프로바이더는 사용자 문서에서 자신만의 외부 ID 필드를 가집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Twitter,
    GitHub,
}

impl AuthProvider {
    pub const ALL: [AuthProvider; 3] = [AuthProvider::Google, AuthProvider::Twitter, AuthProvider::GitHub];

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "twitter" => Ok(AuthProvider::Twitter),
            "github" => Ok(AuthProvider::GitHub),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Twitter => "twitter",
            AuthProvider::GitHub => "github",
        }
    }

    /// 사용자 문서에서 이 프로바이더의 외부 ID가 저장되는 필드명
    pub fn external_id_field(&self) -> &'static str {
        match self {
            AuthProvider::Google => "googleId",
            AuthProvider::Twitter => "twitterId",
            AuthProvider::GitHub => "githubId",
        }
    }

    fn env_prefix(&self) -> &'static str {
        match self {
            AuthProvider::Google => "GOOGLE",
            AuthProvider::Twitter => "TWITTER",
            AuthProvider::GitHub => "GITHUB",
        }
    }

    fn default_auth_uri(&self) -> &'static str {
        match self {
            AuthProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            AuthProvider::Twitter => "https://twitter.com/i/oauth2/authorize",
            AuthProvider::GitHub => "https://github.com/login/oauth/authorize",
        }
    }

    fn default_token_uri(&self) -> &'static str {
        match self {
            AuthProvider::Google => "https://oauth2.googleapis.com/token",
            AuthProvider::Twitter => "https://api.twitter.com/2/oauth2/token",
            AuthProvider::GitHub => "https://github.com/login/oauth/access_token",
        }
    }

    fn default_profile_uri(&self) -> &'static str {
        match self {
            AuthProvider::Google => "https://openidconnect.googleapis.com/v1/userinfo",
            AuthProvider::Twitter => "https://api.twitter.com/2/users/me",
            AuthProvider::GitHub => "https://api.github.com/user",
        }
    }

    /// 프로필 조회에 필요한 최소 스코프
    pub fn scopes(&self) -> &'static [&'static str] {
        match self {
            AuthProvider::Google => &["profile"],
            AuthProvider::Twitter => &["users.read", "tweet.read"],
            AuthProvider::GitHub => &["read:user"],
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 한 프로바이더의 OAuth 클라이언트 설정
#[derive(Debug, Clone)]
pub struct OAuthProviderConfig {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub profile_uri: String,
    pub redirect_uri: String,
}

impl OAuthProviderConfig {
    /// 환경 변수에서 프로바이더 설정을 읽습니다.
    ///
    /// `{PREFIX}_CLIENT_ID`가 없으면 `None`을 반환하여 프로바이더를 비활성화합니다.
    pub fn for_provider(provider: AuthProvider) -> Option<Self> {
        let prefix = provider.env_prefix();
        let var = |suffix: &str| env::var(format!("{}_{}", prefix, suffix)).ok();

        let client_id = var("CLIENT_ID").filter(|id| !id.trim().is_empty())?;
        let client_secret = var("CLIENT_SECRET").unwrap_or_else(|| {
            log::warn!("{}_CLIENT_SECRET not set, token exchange will likely fail", prefix);
            String::new()
        });

        Some(Self {
            provider,
            client_id,
            client_secret,
            auth_uri: var("AUTH_URI").unwrap_or_else(|| provider.default_auth_uri().to_string()),
            token_uri: var("TOKEN_URI").unwrap_or_else(|| provider.default_token_uri().to_string()),
            profile_uri: var("PROFILE_URI").unwrap_or_else(|| provider.default_profile_uri().to_string()),
            redirect_uri: var("REDIRECT_URI").unwrap_or_else(|| {
                format!("{}/auth/{}/callback", ServerConfig::public_base_url(), provider.as_str())
            }),
        })
    }

    /// 설정된(활성화된) 모든 프로바이더 설정
    pub fn enabled() -> Vec<Self> {
        AuthProvider::ALL
            .iter()
            .filter_map(|provider| Self::for_provider(*provider))
            .collect()
    }
}

/// 세션 쿠키 및 수명 설정
pub struct SessionConfig;

impl SessionConfig {
    pub fn cookie_name() -> String {
        env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "sid".to_string())
    }

    /// 세션의 절대 수명 (초). 활동 여부와 무관하게 이 시간이 지나면 만료됩니다.
    ///
    /// 최대 1년으로 제한됩니다.
    pub fn max_age_seconds() -> i64 {
        bounded_seconds(
            env::var("SESSION_MAX_AGE_SECONDS").ok().as_deref(),
            60 * 60 * 24 * 7,
            MAX_SESSION_AGE_SECONDS,
        )
    }

    pub fn cookie_secure() -> bool {
        env::var("SESSION_COOKIE_SECURE")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true)
    }
}

pub struct OAuthConfig;

impl OAuthConfig {
    /// 인증 시작 후 콜백까지 허용되는 시간 (초). 최대 1일.
    pub fn state_ttl_seconds() -> i64 {
        bounded_seconds(
            env::var("OAUTH_STATE_TTL_SECONDS").ok().as_deref(),
            600,
            MAX_STATE_TTL_SECONDS,
        )
    }
}

const MAX_SESSION_AGE_SECONDS: i64 = 60 * 60 * 24 * 365;
const MAX_STATE_TTL_SECONDS: i64 = 60 * 60 * 24;

/// 양수 초 값을 파싱합니다. 없거나 잘못된 값은 기본값, 너무 큰 값은 상한으로 맞춥니다.
fn bounded_seconds(raw: Option<&str>, default: i64, max: i64) -> i64 {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(v) if v > 0 => v.min(max),
        _ => default,
    }
}
