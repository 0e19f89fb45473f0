//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 TTL 기반 키-값 저장과 JSON 직렬화를 제공합니다.
//! 세션 레코드와 OAuth 핸드셰이크 state가 이 계층 위에 저장됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("session:abc", &record, 604800).await?;
//!
//! let record: Option<SessionRecord> = cache.get("session:abc").await?;
//! let pending: Option<PendingHandshake> = cache.take("oauth_state:xyz").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
