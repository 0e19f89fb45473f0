//! 인증 요청관련 DTO
//!
//! 프로바이더가 콜백으로 넘겨주는 쿼리 파라미터를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// OAuth 콜백 쿼리 파라미터 구조체
///
/// 사용자가 동의를 거부하면 `code` 없이 `error`만 전달됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 2048, message = "Authorization code가 너무 깁니다"))]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 512, message = "State가 너무 깁니다"))]
    pub state: Option<String>,

    /// 에러가 있을 경우 (사용자가 거부했거나 에러 발생)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error_description: Option<String>,
}
