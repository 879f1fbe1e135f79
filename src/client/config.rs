//! Signer configuration

use crate::crypto::starkex::FeePolicy;
use std::fmt;

/// 서명기 설정
#[derive(Clone)]
pub struct SignerConfig {
    l1_private_key: Option<String>,
    l2_private_key: Option<String>,
    fee_policy: FeePolicy,
    debug: bool,
    cache_key_pairs: bool,
    max_cache_entries: usize,
}

impl SignerConfig {
    /// 새로운 빈 설정 생성
    pub fn new() -> Self {
        Self {
            l1_private_key: None,
            l2_private_key: None,
            fee_policy: FeePolicy::Reject,
            debug: false,
            cache_key_pairs: false,
            max_cache_entries: 16,
        }
    }

    /// L1 (비공개 API 인증) 개인키 설정
    pub fn with_l1_private_key(mut self, key: impl Into<String>) -> Self {
        self.l1_private_key = Some(key.into());
        self
    }

    /// L2 (StarkEx 메시지 서명) 개인키 설정
    pub fn with_l2_private_key(mut self, key: impl Into<String>) -> Self {
        self.l2_private_key = Some(key.into());
        self
    }

    /// 두 키를 한 번에 설정
    pub fn with_keys(mut self, l1: impl Into<String>, l2: impl Into<String>) -> Self {
        self.l1_private_key = Some(l1.into());
        self.l2_private_key = Some(l2.into());
        self
    }

    /// 부분 수수료 입력 처리 정책
    pub fn with_fee_policy(mut self, policy: FeePolicy) -> Self {
        self.fee_policy = policy;
        self
    }

    /// 디버그 이벤트를 tracing으로 출력
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 파생된 키 쌍 캐시 사용
    pub fn with_key_pair_cache(mut self, enabled: bool) -> Self {
        self.cache_key_pairs = enabled;
        self
    }

    /// 캐시 최대 항목 수
    pub fn with_max_cache_entries(mut self, max_entries: usize) -> Self {
        self.max_cache_entries = max_entries.max(1);
        self
    }

    // === Getters ===

    pub fn l1_private_key(&self) -> Option<&str> {
        self.l1_private_key.as_deref()
    }

    pub fn l2_private_key(&self) -> Option<&str> {
        self.l2_private_key.as_deref()
    }

    pub fn fee_policy(&self) -> FeePolicy {
        self.fee_policy
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn caches_key_pairs(&self) -> bool {
        self.cache_key_pairs
    }

    pub fn max_cache_entries(&self) -> usize {
        self.max_cache_entries
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

// 개인키는 출력하지 않음
impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("SignerConfig")
            .field("l1_private_key", &redact(&self.l1_private_key))
            .field("l2_private_key", &redact(&self.l2_private_key))
            .field("fee_policy", &self.fee_policy)
            .field("debug", &self.debug)
            .field("cache_key_pairs", &self.cache_key_pairs)
            .field("max_cache_entries", &self.max_cache_entries)
            .finish()
    }
}
