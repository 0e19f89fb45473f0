//! # Redis 클라이언트 구현
//!
//! Redis를 백엔드로 하는 키-값 클라이언트를 제공합니다.
//! 모든 값은 JSON 문자열로 저장되며, 만료 시간(TTL)과 함께 기록됩니다.
//!
//! ## 연결 관리
//!
//! 시작 시 만든 `ConnectionManager` 하나를 모든 요청이 복제해서 사용합니다.
//! 멀티플렉싱된 단일 연결이며, 끊어지면 자동으로 재연결합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL` 환경 변수로 클라이언트를 만들고 PING으로 연결을 검증합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;
        let mut manager = client.get_connection_manager().await?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        value.map(|json| Self::decode(&json)).transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;
        conn.set_ex(key, json, seconds).await
    }

    /// 값을 읽는 동시에 삭제합니다 (GETDEL). 일회성 값에 사용됩니다.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get_del(key).await?;

        value.map(|json| Self::decode(&json)).transpose()
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    fn decode<T: DeserializeOwned>(json: &str) -> Result<T, redis::RedisError> {
        serde_json::from_str(json)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))
    }
}
