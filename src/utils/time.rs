//! Time utilities

use chrono::Utc;

/// 현재 UTC 타임스탬프 (밀리초)
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// 시계 추상화
///
/// The private API signer reads the clock exactly once per call, so a fixed
/// clock makes headers reproducible in tests.
pub trait Clock: Send + Sync {
    /// 현재 UTC 타임스탬프 (밀리초)
    fn now_ms(&self) -> i64;
}

/// 시스템 시계
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }
}

/// 고정 시계 (테스트용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}
