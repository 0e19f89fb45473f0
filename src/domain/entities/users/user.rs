//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 하나의 사용자는 여러 프로바이더의 외부 ID를 가질 수 있으며,
//! 각 외부 ID 필드는 한 번 설정되면 변경되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// 저장 형태는 기존 `users` 컬렉션 문서와 호환되도록 camelCase 필드명을 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 내부 ID. 생성 시 한 번 할당되고 이후 변경되지 않습니다.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 표시 이름 (고유하지 않음, 빈 문자열 허용)
    #[serde(default)]
    pub username: String,
    #[serde(rename = "googleId", default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(rename = "twitterId", default, skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,
    #[serde(rename = "githubId", default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
    /// 생성 시간
    #[serde(rename = "createdAt", default = "DateTime::now")]
    pub created_at: DateTime,
}

impl User {
    /// 프로바이더 인증으로 처음 확인된 신원의 사용자를 생성합니다.
    ///
    /// 새 내부 ID를 즉시 할당하므로, 저장소 삽입 한 번으로 레코드가 완성됩니다.
    pub fn new_from_provider(provider: AuthProvider, external_id: &str, display_name: &str) -> Self {
        let mut user = Self {
            id: Some(ObjectId::new()),
            username: display_name.to_string(),
            google_id: None,
            twitter_id: None,
            github_id: None,
            created_at: DateTime::now(),
        };

        *user.external_id_slot(provider) = Some(external_id.to_string());
        user
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    /// 특정 프로바이더의 외부 ID
    pub fn external_id(&self, provider: AuthProvider) -> Option<&str> {
        match provider {
            AuthProvider::Google => self.google_id.as_deref(),
            AuthProvider::Twitter => self.twitter_id.as_deref(),
            AuthProvider::GitHub => self.github_id.as_deref(),
        }
    }

    fn external_id_slot(&mut self, provider: AuthProvider) -> &mut Option<String> {
        match provider {
            AuthProvider::Google => &mut self.google_id,
            AuthProvider::Twitter => &mut self.twitter_id,
            AuthProvider::GitHub => &mut self.github_id,
        }
    }
}
