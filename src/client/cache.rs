//! Key pair cache
//!
//! 같은 개인키로 반복 서명할 때 공개키 파생을 생략합니다.

use crate::crypto::starknet::{normalize_private_key, StarkKeyPair};
use crate::errors::EdgexResult;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 캐시 통계
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// 캐시 히트 수
    pub hits: u64,
    /// 캐시 미스 수
    pub misses: u64,
    /// 현재 캐시 항목 수
    pub entries: usize,
}

impl CacheStats {
    /// 캐시 히트율 계산
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// 정규화된 개인키 → 키 쌍
pub struct KeyPairCache {
    entries: RwLock<HashMap<String, Arc<StarkKeyPair>>>,
    stats: RwLock<CacheStats>,
    max_entries: usize,
}

impl KeyPairCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: RwLock::new(CacheStats::default()),
            max_entries: max_entries.max(1),
        }
    }

    /// 키 쌍 조회, 없으면 파생 후 저장
    ///
    /// 키 표기 (`0x` 유무, 대소문자, 앞자리 0)가 달라도 같은 항목을 공유합니다.
    pub fn get_or_derive(&self, private_key_hex: &str) -> EdgexResult<Arc<StarkKeyPair>> {
        let normalized = normalize_private_key(private_key_hex)?;

        // 잠금이 오염되어도 캐시는 파생만 다시 하면 됨
        if let Ok(entries) = self.entries.read() {
            if let Some(key_pair) = entries.get(&normalized) {
                self.bump(|stats| stats.hits += 1);
                return Ok(Arc::clone(key_pair));
            }
        }

        let key_pair = Arc::new(StarkKeyPair::from_normalized_hex(&normalized)?);
        self.bump(|stats| stats.misses += 1);

        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                entries.clear();
            }
            entries.insert(normalized, Arc::clone(&key_pair));
            let len = entries.len();
            self.bump(|stats| stats.entries = len);
        }

        Ok(key_pair)
    }

    /// 캐시 전체 삭제
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        self.bump(|stats| stats.entries = 0);
    }

    /// 캐시 항목 수 조회
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// 캐시가 비어있는지 확인
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 캐시 통계 조회
    pub fn stats(&self) -> CacheStats {
        self.stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    fn bump(&self, update: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.write() {
            update(&mut stats);
        }
    }
}

impl Default for KeyPairCache {
    fn default() -> Self {
        Self::new(16)
    }
}
