//! StarkEx L2 message parameters
//!
//! 지정가 주문, 전송, 출금 메시지의 파라미터 번들.
//!
//! 수수료 포함 여부는 태그된 variant로 표현되며, 느슨한 JSON 요청 형태
//! (`LimitOrderRequest`, `TransferRequest`)는 [`FeePolicy`]에 따라 변환됩니다.

use crate::errors::{EdgexError, EdgexResult};
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// L2 정수 필드
///
/// JSON 숫자, 10진수 문자열, Rust 정수 어느 쪽에서 만들어도 같은 값으로 정규화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct L2Number(BigUint);

impl L2Number {
    /// 내부 값
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// 비트 폭 확인 후 값 반환
    pub fn checked(&self, field: &str, bits: u32) -> EdgexResult<&BigUint> {
        if self.0.bits() > u64::from(bits) {
            return Err(EdgexError::FieldOverflow {
                field: field.into(),
                bits,
                value: self.0.to_string(),
            });
        }
        Ok(&self.0)
    }
}

impl From<u32> for L2Number {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u64> for L2Number {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for L2Number {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for L2Number {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl FromStr for L2Number {
    type Err = EdgexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim();
        if cleaned.is_empty() || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EdgexError::invalid_parameter(
                "number",
                format!("expected unsigned decimal integer, got {s:?}"),
            ));
        }
        BigUint::from_str(cleaned)
            .map(Self)
            .map_err(|e| EdgexError::invalid_parameter("number", e.to_string()))
    }
}

impl fmt::Display for L2Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for L2Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for L2Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(L2Number::from(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// 부분 수수료 입력 처리 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeePolicy {
    /// 수수료 필드가 1~2개만 있으면 오류
    #[default]
    Reject,
    /// 수수료 필드가 1~2개만 있으면 무시하고 수수료 없는 해시 사용
    FallbackToNoFee,
}

/// 수수료 정보 (세 필드 모두 필요)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeInfo {
    pub fee_token_id: String,
    pub fee_source_vault_id: L2Number,
    pub fee_limit: L2Number,
}

impl FeeInfo {
    pub fn new(
        fee_token_id: impl Into<String>,
        fee_source_vault_id: impl Into<L2Number>,
        fee_limit: impl Into<L2Number>,
    ) -> Self {
        Self {
            fee_token_id: fee_token_id.into(),
            fee_source_vault_id: fee_source_vault_id.into(),
            fee_limit: fee_limit.into(),
        }
    }
}

/// 지정가 주문 필드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrder {
    pub vault_id_sell: L2Number,
    pub vault_id_buy: L2Number,
    pub amount_sell: L2Number,
    pub amount_buy: L2Number,
    /// 판매 토큰 ID (hex)
    pub token_sell: String,
    /// 구매 토큰 ID (hex)
    pub token_buy: String,
    pub nonce: L2Number,
    /// 만료 시각 (시간 단위)
    pub expiration_timestamp: L2Number,
}

/// 지정가 주문 파라미터
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitOrderParams {
    NoFee(LimitOrder),
    WithFee { order: LimitOrder, fee: FeeInfo },
}

impl LimitOrderParams {
    /// 수수료 없는 주문
    pub fn new(order: LimitOrder) -> Self {
        LimitOrderParams::NoFee(order)
    }

    /// 수수료 설정
    pub fn with_fee(self, fee: FeeInfo) -> Self {
        LimitOrderParams::WithFee {
            order: self.into_order(),
            fee,
        }
    }

    pub fn order(&self) -> &LimitOrder {
        match self {
            LimitOrderParams::NoFee(order) | LimitOrderParams::WithFee { order, .. } => order,
        }
    }

    pub fn fee(&self) -> Option<&FeeInfo> {
        match self {
            LimitOrderParams::NoFee(_) => None,
            LimitOrderParams::WithFee { fee, .. } => Some(fee),
        }
    }

    fn into_order(self) -> LimitOrder {
        match self {
            LimitOrderParams::NoFee(order) | LimitOrderParams::WithFee { order, .. } => order,
        }
    }
}

/// 전송 필드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub amount: L2Number,
    pub nonce: L2Number,
    pub sender_vault_id: L2Number,
    /// 토큰 ID (hex)
    pub token: String,
    pub target_vault_id: L2Number,
    /// 수신자 STARK 공개키 (hex)
    pub target_public_key: String,
    pub expiration_timestamp: L2Number,
    /// 조건부 전송의 조건 (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// 전송 파라미터
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferParams {
    NoFee(Transfer),
    WithFee { transfer: Transfer, fee: FeeInfo },
}

impl TransferParams {
    /// 수수료 없는 전송
    pub fn new(transfer: Transfer) -> Self {
        TransferParams::NoFee(transfer)
    }

    /// 수수료 설정
    pub fn with_fee(self, fee: FeeInfo) -> Self {
        TransferParams::WithFee {
            transfer: self.into_transfer(),
            fee,
        }
    }

    pub fn transfer(&self) -> &Transfer {
        match self {
            TransferParams::NoFee(transfer) | TransferParams::WithFee { transfer, .. } => transfer,
        }
    }

    pub fn fee(&self) -> Option<&FeeInfo> {
        match self {
            TransferParams::NoFee(_) => None,
            TransferParams::WithFee { fee, .. } => Some(fee),
        }
    }

    fn into_transfer(self) -> Transfer {
        match self {
            TransferParams::NoFee(transfer) | TransferParams::WithFee { transfer, .. } => transfer,
        }
    }
}

/// 출금 파라미터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalParams {
    /// 담보 자산 ID (hex, 0x 선택)
    pub asset_id_collateral: String,
    /// 수신 이더리움 주소 (hex, 0x 선택)
    pub eth_address: String,
    pub position_id: L2Number,
    pub nonce: L2Number,
    pub amount: L2Number,
    pub expiration_timestamp: L2Number,
}

/// 지정가 주문 요청 (JSON 형태, 수수료 필드 선택)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderRequest {
    #[serde(flatten)]
    pub order: LimitOrder,
    #[serde(default)]
    pub fee_token_id: Option<String>,
    #[serde(default)]
    pub fee_source_vault_id: Option<L2Number>,
    #[serde(default)]
    pub fee_limit: Option<L2Number>,
}

impl LimitOrderRequest {
    /// 태그된 파라미터로 변환
    pub fn into_params(self, policy: FeePolicy) -> EdgexResult<LimitOrderParams> {
        let fee = resolve_fee(
            self.fee_token_id,
            self.fee_source_vault_id,
            self.fee_limit,
            policy,
        )?;
        Ok(match fee {
            Some(fee) => LimitOrderParams::WithFee {
                order: self.order,
                fee,
            },
            None => LimitOrderParams::NoFee(self.order),
        })
    }
}

/// 전송 요청 (JSON 형태, 수수료 필드 선택)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[serde(flatten)]
    pub transfer: Transfer,
    #[serde(default)]
    pub fee_token_id: Option<String>,
    #[serde(default)]
    pub fee_source_vault_id: Option<L2Number>,
    #[serde(default)]
    pub fee_limit: Option<L2Number>,
}

impl TransferRequest {
    /// 태그된 파라미터로 변환
    pub fn into_params(self, policy: FeePolicy) -> EdgexResult<TransferParams> {
        let fee = resolve_fee(
            self.fee_token_id,
            self.fee_source_vault_id,
            self.fee_limit,
            policy,
        )?;
        Ok(match fee {
            Some(fee) => TransferParams::WithFee {
                transfer: self.transfer,
                fee,
            },
            None => TransferParams::NoFee(self.transfer),
        })
    }
}

/// 수수료 필드 조합 해석
///
/// 세 필드가 모두 있을 때만 수수료 포함 해시를 사용합니다.
fn resolve_fee(
    fee_token_id: Option<String>,
    fee_source_vault_id: Option<L2Number>,
    fee_limit: Option<L2Number>,
    policy: FeePolicy,
) -> EdgexResult<Option<FeeInfo>> {
    match (fee_token_id, fee_source_vault_id, fee_limit) {
        (Some(fee_token_id), Some(fee_source_vault_id), Some(fee_limit)) => Ok(Some(FeeInfo {
            fee_token_id,
            fee_source_vault_id,
            fee_limit,
        })),
        (None, None, None) => Ok(None),
        (token, vault, limit) => {
            let present = [
                ("feeTokenId", token.is_some()),
                ("feeSourceVaultId", vault.is_some()),
                ("feeLimit", limit.is_some()),
            ]
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", ");

            match policy {
                FeePolicy::Reject => Err(EdgexError::PartialFeeParams { present }),
                FeePolicy::FallbackToNoFee => {
                    tracing::warn!(present = %present, "partial fee fields ignored, using no-fee hash");
                    Ok(None)
                }
            }
        }
    }
}
