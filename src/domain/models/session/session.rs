use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::AuthProvider;

const SESSION_KEY_PREFIX: &str = "session:";
const HANDSHAKE_KEY_PREFIX: &str = "oauth_state:";

/// 세션 토큰
///
/// 클라이언트에는 원문이, 저장소에는 SHA-256 해시만 전달됩니다.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// 새 무작위 토큰을 생성합니다.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
        bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());

        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// 쿠키 값 등 외부에서 받은 토큰을 감쌉니다.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 세션 저장소 키: `session:{base64url(sha256(token))}`
    pub fn storage_key(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        format!("{}{}", SESSION_KEY_PREFIX, URL_SAFE_NO_PAD.encode(digest))
    }
}

// 토큰 원문이 로그에 남지 않도록 마스킹
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// 서버 측 세션 레코드
///
/// 사용자 전체가 아닌 내부 ID만 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    /// 발급 시각 (Unix seconds)
    pub issued_at: i64,
    /// 절대 만료 시각 (Unix seconds)
    pub expires_at: i64,
}

impl SessionRecord {
    pub fn new(user_id: String, issued_at: i64, max_age_seconds: i64) -> Self {
        Self {
            user_id,
            issued_at,
            expires_at: issued_at.saturating_add(max_age_seconds),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// 남은 수명 (초). 만료되었으면 0.
    pub fn remaining_seconds(&self, now: i64) -> u64 {
        self.expires_at.saturating_sub(now).max(0) as u64
    }
}

/// 콜백을 기다리는 OAuth 핸드셰이크
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHandshake {
    pub provider: AuthProvider,
    pub pkce_verifier: String,
    pub expires_at: i64,
}

impl PendingHandshake {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// 핸드셰이크 저장소 키: `oauth_state:{state}`
    pub fn storage_key(state: &str) -> String {
        format!("{}{}", HANDSHAKE_KEY_PREFIX, state)
    }
}
