//! # OAuth 프로바이더 어댑터
//!
//! 프로토콜 처리(인가 URL 생성, 코드 교환, PKCE)는 `oauth2` 크레이트에 맡기고,
//! 이 모듈은 프로바이더별 설정과 프로필 조회, 결과 변환만 담당합니다.
//!
//! ## 플로우
//!
//! 1. [`authorization_request`](ProviderAdapter::authorization_request) - 인가 URL,
//!    CSRF state, PKCE verifier 생성
//! 2. 사용자가 프로바이더에서 동의 후 `/auth/{provider}/callback`으로 복귀
//! 3. [`complete_handshake`](ProviderAdapter::complete_handshake) - 코드를 토큰으로
//!    교환하고 프로필을 조회하여 [`HandshakeResult`]로 변환
//!
//! 어떤 단계에서 실패하든 에러가 아닌 `HandshakeResult::Failure`를 반환합니다.

use async_trait::async_trait;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet,
    EndpointSet, PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};

use crate::config::{AuthProvider, OAuthProviderConfig};
use crate::domain::models::oauth::{HandshakeResult, ProviderProfile};
use crate::errors::{AppError, AppResult, ErrorContext};

const USER_AGENT: &str = "social-login-backend";

/// 프로바이더 인가 요청
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub pkce_verifier: String,
}

/// OAuth 프로바이더 어댑터
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 인가 URL과 이번 핸드셰이크의 state, PKCE verifier를 생성합니다.
    fn authorization_request(&self) -> AuthorizationRequest;

    /// 인가 코드를 교환하고 프로필을 조회합니다.
    async fn complete_handshake(&self, code: &str, pkce_verifier: &str) -> HandshakeResult;
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// `oauth2` + `reqwest` 기반 어댑터 (Google, Twitter, GitHub 공용)
pub struct OAuthProviderAdapter {
    provider: AuthProvider,
    client: ConfiguredClient,
    profile_uri: String,
    http: reqwest::Client,
}

impl OAuthProviderAdapter {
    pub fn new(config: OAuthProviderConfig) -> AppResult<Self> {
        let invalid = |field: &str, e: oauth2::url::ParseError| {
            AppError::ValidationError(format!("{} {} 설정이 잘못되었습니다: {}", config.provider, field, e))
        };

        let auth_url = AuthUrl::new(config.auth_uri.clone()).map_err(|e| invalid("auth_uri", e))?;
        let token_url = TokenUrl::new(config.token_uri.clone()).map_err(|e| invalid("token_uri", e))?;
        let redirect_url = RedirectUrl::new(config.redirect_uri.clone()).map_err(|e| invalid("redirect_uri", e))?;

        let mut client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url);

        // GitHub은 클라이언트 자격 증명을 요청 본문으로 받습니다
        if config.provider == AuthProvider::GitHub {
            client = client.set_auth_type(AuthType::RequestBody);
        }

        // 토큰 엔드포인트의 리다이렉트는 따라가지 않음
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            provider: config.provider,
            client,
            profile_uri: config.profile_uri,
            http,
        })
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<serde_json::Value, String> {
        let response = self.http
            .get(&self.profile_uri)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| format!("프로필 요청 실패: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("프로필 요청 실패: HTTP {}", response.status()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| format!("프로필 응답 파싱 실패: {}", e))
    }
}

#[async_trait]
impl ProviderAdapter for OAuthProviderAdapter {
    fn provider(&self) -> AuthProvider {
        self.provider
    }

    fn authorization_request(&self) -> AuthorizationRequest {
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = self.client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(
                self.provider
                    .scopes()
                    .iter()
                    .map(|scope| Scope::new(scope.to_string())),
            )
            .set_pkce_challenge(pkce_challenge)
            .url();

        AuthorizationRequest {
            url: auth_url.to_string(),
            state: csrf_state.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
        }
    }

    async fn complete_handshake(&self, code: &str, pkce_verifier: &str) -> HandshakeResult {
        let token_result = self.client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pkce_verifier.to_string()))
            .request_async(&self.http)
            .await;

        let token = match token_result {
            Ok(token) => token,
            Err(e) => {
                log::warn!("{} 토큰 교환 실패: {}", self.provider, e);
                return HandshakeResult::failure("token exchange failed");
            }
        };

        let body = match self.fetch_profile(token.access_token().secret()).await {
            Ok(body) => body,
            Err(e) => {
                log::warn!("{} {}", self.provider, e);
                return HandshakeResult::failure("profile unavailable");
            }
        };

        match ProviderProfile::from_json(self.provider, body) {
            Some(profile) => HandshakeResult::from(profile),
            None => {
                log::warn!("{} 프로필에 외부 ID가 없습니다", self.provider);
                HandshakeResult::failure("profile missing external id")
            }
        }
    }
}
