use serde::{Deserialize, Serialize};

use super::provider_profile::ProviderProfile;

/// 프로바이더 핸드셰이크 결과
///
/// 성공 시에만 외부 ID와 표시 이름이 존재합니다.
/// 호출 측은 두 경우를 모두 처리해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum HandshakeResult {
    Success {
        external_id: String,
        display_name: String,
    },
    Failure {
        reason: String,
    },
}

impl HandshakeResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        HandshakeResult::Failure {
            reason: reason.into(),
        }
    }
}

impl From<ProviderProfile> for HandshakeResult {
    fn from(profile: ProviderProfile) -> Self {
        HandshakeResult::Success {
            external_id: profile.external_id,
            display_name: profile.display_name,
        }
    }
}
