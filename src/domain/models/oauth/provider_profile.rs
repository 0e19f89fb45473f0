//! # 프로바이더 프로필 매핑
//!
//! 각 프로바이더의 프로필 API 응답에서 외부 ID와 표시 이름을 추출합니다.
//!
//! | 프로바이더 | 외부 ID | 표시 이름 |
//! |------------|---------|-----------|
//! | Google (`/v1/userinfo`) | `sub` (구버전 `id`) | `given_name`, 없으면 `name` |
//! | Twitter (`/2/users/me`) | `data.id` | `data.username` |
//! | GitHub (`/user`) | `id` (숫자) | `login` |

use serde::Deserialize;

use crate::config::AuthProvider;
use crate::utils::string_utils::{clean_optional_string, first_display_name};

/// 프로바이더 프로필에서 추출한 신원 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub external_id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    sub: Option<String>,
    id: Option<String>,
    given_name: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwitterUserEnvelope {
    data: TwitterUser,
}

#[derive(Debug, Deserialize)]
struct TwitterUser {
    id: String,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: serde_json::Value,
    login: Option<String>,
}

impl ProviderProfile {
    /// 프로필 응답 JSON을 해석합니다.
    ///
    /// 외부 ID를 찾을 수 없거나 비어 있으면 `None`을 반환합니다.
    pub fn from_json(provider: AuthProvider, body: serde_json::Value) -> Option<Self> {
        let (external_id, display_name) = match provider {
            AuthProvider::Google => {
                let info: GoogleUserInfo = serde_json::from_value(body).ok()?;
                (
                    clean_optional_string(info.sub.or(info.id)),
                    first_display_name([info.given_name, info.name]),
                )
            }
            AuthProvider::Twitter => {
                let envelope: TwitterUserEnvelope = serde_json::from_value(body).ok()?;
                (
                    clean_optional_string(Some(envelope.data.id)),
                    first_display_name([envelope.data.username]),
                )
            }
            AuthProvider::GitHub => {
                let user: GitHubUser = serde_json::from_value(body).ok()?;
                let id = match user.id {
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                };
                (clean_optional_string(id), first_display_name([user.login]))
            }
        };

        Some(Self {
            external_id: external_id?,
            display_name,
        })
    }
}
