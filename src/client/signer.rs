//! edgeX signer
//!
//! 설정된 키, 시계, 디버그 싱크로 인증 헤더와 L2 서명을 생성합니다.

use super::cache::KeyPairCache;
use super::config::SignerConfig;
use crate::crypto::edgex::auth::{sign_private_api_request, AuthHeaders, SignableParams};
use crate::crypto::edgex::l2::{
    sign_limit_order_with, sign_transfer_with, sign_withdrawal_with, L2Signature,
};
use crate::crypto::starkex::{
    LimitOrderParams, LimitOrderRequest, TransferParams, TransferRequest, WithdrawalParams,
};
use crate::crypto::starknet::StarkKeyPair;
use crate::errors::{EdgexError, EdgexResult};
use crate::utils::{Clock, DebugSink, NoopSink, SystemClock, TracingSink};
use serde_json::Value;
use std::sync::Arc;

/// edgeX 서명기
///
/// # Example
///
/// ```rust,ignore
/// use edgex_signer::{EdgexSigner, SignerConfig};
///
/// let signer = EdgexSigner::new(SignerConfig::new().with_keys(l1, l2));
/// let headers = signer.generate_private_api_auth_headers("GET", "/api/v1/private/account", None)?;
/// ```
pub struct EdgexSigner {
    config: SignerConfig,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn DebugSink>,
    cache: Option<KeyPairCache>,
}

impl EdgexSigner {
    pub fn new(config: SignerConfig) -> Self {
        let sink: Arc<dyn DebugSink> = if config.is_debug() {
            Arc::new(TracingSink)
        } else {
            Arc::new(NoopSink)
        };
        let cache = config
            .caches_key_pairs()
            .then(|| KeyPairCache::new(config.max_cache_entries()));

        Self {
            config,
            clock: Arc::new(SystemClock),
            sink,
            cache,
        }
    }

    /// 시계 교체 (테스트용 고정 시계 등)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 디버그 싱크 교체
    pub fn with_sink(mut self, sink: Arc<dyn DebugSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    pub fn key_pair_cache(&self) -> Option<&KeyPairCache> {
        self.cache.as_ref()
    }

    /// L1 키로 비공개 API 인증 헤더 생성
    pub fn generate_private_api_auth_headers(
        &self,
        method: &str,
        path: &str,
        params: Option<&SignableParams>,
    ) -> EdgexResult<AuthHeaders> {
        let key_pair = self.key_pair(self.config.l1_private_key(), "l1PrivateKey")?;
        sign_private_api_request(
            &key_pair,
            method,
            path,
            params,
            self.clock.as_ref(),
            self.sink.as_ref(),
        )
    }

    /// 지정가 주문 서명
    pub fn sign_l2_limit_order(&self, order: &LimitOrderParams) -> EdgexResult<L2Signature> {
        let key_pair = self.l2_key_pair()?;
        sign_limit_order_with(&key_pair, order, self.sink.as_ref())
    }

    /// 전송 서명
    pub fn sign_l2_transfer(&self, transfer: &TransferParams) -> EdgexResult<L2Signature> {
        let key_pair = self.l2_key_pair()?;
        sign_transfer_with(&key_pair, transfer, self.sink.as_ref())
    }

    /// 출금 서명
    pub fn sign_l2_withdrawal(&self, withdrawal: &WithdrawalParams) -> EdgexResult<L2Signature> {
        let key_pair = self.l2_key_pair()?;
        sign_withdrawal_with(&key_pair, withdrawal, self.sink.as_ref())
    }

    /// camelCase JSON 주문 요청 서명 (설정된 수수료 정책 적용)
    pub fn sign_limit_order_request(&self, request: &Value) -> EdgexResult<L2Signature> {
        let request: LimitOrderRequest = serde_json::from_value(request.clone())?;
        self.sign_l2_limit_order(&request.into_params(self.config.fee_policy())?)
    }

    /// camelCase JSON 전송 요청 서명 (설정된 수수료 정책 적용)
    pub fn sign_transfer_request(&self, request: &Value) -> EdgexResult<L2Signature> {
        let request: TransferRequest = serde_json::from_value(request.clone())?;
        self.sign_l2_transfer(&request.into_params(self.config.fee_policy())?)
    }

    /// camelCase JSON 출금 요청 서명
    pub fn sign_withdrawal_request(&self, request: &Value) -> EdgexResult<L2Signature> {
        let request: WithdrawalParams = serde_json::from_value(request.clone())?;
        self.sign_l2_withdrawal(&request)
    }

    fn l2_key_pair(&self) -> EdgexResult<Arc<StarkKeyPair>> {
        self.key_pair(self.config.l2_private_key(), "l2PrivateKey")
    }

    fn key_pair(&self, key: Option<&str>, field: &str) -> EdgexResult<Arc<StarkKeyPair>> {
        let key = key.ok_or_else(|| EdgexError::InvalidKeyValue {
            message: format!("{field} is not configured"),
        })?;
        match &self.cache {
            Some(cache) => cache.get_or_derive(key),
            None => StarkKeyPair::from_private_key_hex(key).map(Arc::new),
        }
    }
}
