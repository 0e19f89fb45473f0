use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// 사용자 응답 DTO
///
/// 프론트엔드는 저장 문서와 같은 필드명(`_id`, `googleId` 등)을 기대합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "googleId", skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(rename = "twitterId", skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
    #[serde(rename = "githubId", skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
    /// RFC 3339 형식 생성 시간
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            google_id,
            twitter_id,
            github_id,
            created_at,
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            google_id,
            twitter_id,
            github_id,
            created_at: created_at
                .try_to_rfc3339_string()
                .unwrap_or_default(),
        }
    }
}
