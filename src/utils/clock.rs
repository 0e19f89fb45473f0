//! 시간 소스 추상화
//!
//! 세션 만료와 핸드셰이크 state 만료는 모두 절대 시각으로 판정됩니다.
//! 테스트에서 시간을 제어할 수 있도록 현재 시각을 trait 뒤로 숨깁니다.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// 현재 Unix 시각(초)을 제공하는 시간 소스
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// 수동으로 진행시키는 시계 (테스트용)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(timestamp: i64) -> Self {
        Self {
            now: AtomicI64::new(timestamp),
        }
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
