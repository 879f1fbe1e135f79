//! edgeX L2 Message Signing
//!
//! StarkEx 지정가 주문, 전송, 출금 메시지에 L2 키로 서명합니다.

use crate::crypto::starkex::{
    limit_order_hash, transfer_hash, withdrawal_hash, LimitOrderParams, TransferParams,
    WithdrawalParams,
};
use crate::crypto::starknet::{
    biguint_to_felt, felt_to_biguint, felt_to_hex, reduce_to_field, StarkKeyPair, StarkSignature,
    COMPONENT_HEX_LEN,
};
use crate::errors::{EdgexError, EdgexResult};
use crate::utils::{DebugEvent, DebugSink, NoopSink};
use serde::{Deserialize, Serialize};
use starknet_types_core::felt::Felt;

/// L2 서명 (r, s 각 64자리 소문자 hex, 접두사 없음)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Signature {
    pub r: String,
    pub s: String,
}

impl L2Signature {
    /// STARK 서명을 고정 길이 hex로 직렬화
    pub fn from_stark(signature: &StarkSignature) -> EdgexResult<Self> {
        let r = signature.r_hex();
        let s = signature.s_hex();
        for component in [&r, &s] {
            if component.len() != COMPONENT_HEX_LEN {
                return Err(EdgexError::SignatureLengthError {
                    expected: COMPONENT_HEX_LEN,
                    actual: component.len(),
                });
            }
        }
        Ok(Self { r, s })
    }

    /// `r ‖ s` (128자리)
    pub fn to_compact(&self) -> String {
        format!("{}{}", self.r, self.s)
    }

    /// STARK 서명으로 역변환
    pub fn to_stark(&self) -> EdgexResult<StarkSignature> {
        StarkSignature::from_hex(&self.r, &self.s)
    }
}

/// L2 개인키에서 키 쌍 파생
pub fn derive_key_pair(l2_private_key_hex: &str) -> EdgexResult<StarkKeyPair> {
    StarkKeyPair::from_private_key_hex(l2_private_key_hex)
}

/// 지정가 주문 서명 대상 해시 (곡선 위수로 축약)
pub fn limit_order_message(params: &LimitOrderParams) -> EdgexResult<Felt> {
    reduce_felt(&limit_order_hash(params)?)
}

/// 전송 서명 대상 해시 (곡선 위수로 축약)
pub fn transfer_message(params: &TransferParams) -> EdgexResult<Felt> {
    reduce_felt(&transfer_hash(params)?)
}

/// 출금 서명 대상 해시 (Pedersen 결과 그대로)
pub fn withdrawal_message(params: &WithdrawalParams) -> EdgexResult<Felt> {
    withdrawal_hash(params)
}

/// 지정가 주문 해시 (`0x` 최소 자릿수 hex)
pub fn hash_limit_order(params: &LimitOrderParams) -> EdgexResult<String> {
    limit_order_message(params).map(|hash| felt_to_hex(&hash))
}

/// 전송 해시 (`0x` 최소 자릿수 hex)
pub fn hash_transfer(params: &TransferParams) -> EdgexResult<String> {
    transfer_message(params).map(|hash| felt_to_hex(&hash))
}

/// 출금 해시 (`0x` 최소 자릿수 hex)
pub fn hash_withdrawal(params: &WithdrawalParams) -> EdgexResult<String> {
    withdrawal_message(params).map(|hash| felt_to_hex(&hash))
}

/// L2 메시지 해시 서명
pub fn sign_l2(key_pair: &StarkKeyPair, message_hash: &Felt) -> EdgexResult<L2Signature> {
    L2Signature::from_stark(&key_pair.sign(message_hash)?)
}

/// 지정가 주문 서명
pub fn sign_l2_limit_order(
    l2_private_key_hex: &str,
    order: &LimitOrderParams,
) -> EdgexResult<L2Signature> {
    sign_limit_order_with(&derive_key_pair(l2_private_key_hex)?, order, &NoopSink)
}

/// 전송 서명
pub fn sign_l2_transfer(
    l2_private_key_hex: &str,
    transfer: &TransferParams,
) -> EdgexResult<L2Signature> {
    sign_transfer_with(&derive_key_pair(l2_private_key_hex)?, transfer, &NoopSink)
}

/// 출금 서명
pub fn sign_l2_withdrawal(
    l2_private_key_hex: &str,
    withdrawal: &WithdrawalParams,
) -> EdgexResult<L2Signature> {
    sign_withdrawal_with(&derive_key_pair(l2_private_key_hex)?, withdrawal, &NoopSink)
}

pub(crate) fn sign_limit_order_with(
    key_pair: &StarkKeyPair,
    order: &LimitOrderParams,
    sink: &dyn DebugSink,
) -> EdgexResult<L2Signature> {
    let hash = limit_order_message(order)?;
    sign_recorded(key_pair, "limit_order", &hash, sink)
}

pub(crate) fn sign_transfer_with(
    key_pair: &StarkKeyPair,
    transfer: &TransferParams,
    sink: &dyn DebugSink,
) -> EdgexResult<L2Signature> {
    let hash = transfer_message(transfer)?;
    sign_recorded(key_pair, "transfer", &hash, sink)
}

pub(crate) fn sign_withdrawal_with(
    key_pair: &StarkKeyPair,
    withdrawal: &WithdrawalParams,
    sink: &dyn DebugSink,
) -> EdgexResult<L2Signature> {
    let hash = withdrawal_message(withdrawal)?;
    sign_recorded(key_pair, "withdrawal", &hash, sink)
}

fn sign_recorded(
    key_pair: &StarkKeyPair,
    kind: &'static str,
    hash: &Felt,
    sink: &dyn DebugSink,
) -> EdgexResult<L2Signature> {
    sink.record(&DebugEvent::L2Hash {
        kind,
        hash: felt_to_hex(hash),
    });
    let signature = sign_l2(key_pair, hash)?;
    sink.record(&DebugEvent::signed(
        kind,
        key_pair.public_key_hex(),
        &signature.to_compact(),
    ));
    Ok(signature)
}

fn reduce_felt(hash: &Felt) -> EdgexResult<Felt> {
    biguint_to_felt(&reduce_to_field(&felt_to_biguint(hash)), "messageHash")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starkex::{FeeInfo, L2Number, LimitOrder};
    use crate::crypto::starknet::ec_order;

    const L2_KEY: &str = "0x3c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc";

    fn order() -> LimitOrder {
        LimitOrder {
            vault_id_sell: 21u64.into(),
            vault_id_buy: 27u64.into(),
            amount_sell: 2154686749748910716u64.into(),
            amount_buy: 1470242115489520459u64.into(),
            token_sell: "0x5fa3383597691ea9d827a79e1a4f0f7989c35ced18ca9619de8ab97e661020".into(),
            token_buy: "0x774961c824a3b0fb3d2965f01471c9c7734bf8dbde659e0c08dca2ef18d56a".into(),
            nonce: 0u64.into(),
            expiration_timestamp: 438953u64.into(),
        }
    }

    #[test]
    fn test_sign_limit_order_shape_and_verify() {
        let params = LimitOrderParams::new(order());
        let signature = sign_l2_limit_order(L2_KEY, &params).unwrap();

        assert_eq!(signature.r.len(), 64);
        assert_eq!(signature.s.len(), 64);
        assert_eq!(signature.to_compact().len(), 128);

        let key_pair = derive_key_pair(L2_KEY).unwrap();
        let hash = limit_order_message(&params).unwrap();
        assert!(key_pair.verify(&hash, &signature.to_stark().unwrap()).unwrap());
    }

    #[test]
    fn test_sign_is_reproducible() {
        let params = LimitOrderParams::new(order());
        assert_eq!(
            sign_l2_limit_order(L2_KEY, &params).unwrap(),
            sign_l2_limit_order(L2_KEY, &params).unwrap()
        );
    }

    #[test]
    fn test_key_prefix_and_padding_equivalent() {
        let params = LimitOrderParams::new(order());
        let unprefixed = L2_KEY.trim_start_matches("0x");
        let padded = format!("0x{unprefixed:0>64}");
        assert_eq!(
            sign_l2_limit_order(unprefixed, &params).unwrap(),
            sign_l2_limit_order(&padded, &params).unwrap()
        );
    }

    #[test]
    fn test_reduced_hash_below_order() {
        let hash = limit_order_message(&LimitOrderParams::new(order())).unwrap();
        assert!(felt_to_biguint(&hash) < *ec_order());
        assert!(hash_limit_order(&LimitOrderParams::new(order()))
            .unwrap()
            .starts_with("0x"));
    }

    #[test]
    fn test_fee_signature_differs() {
        let plain = LimitOrderParams::new(order());
        let with_fee = LimitOrderParams::new(order()).with_fee(FeeInfo::new(
            "0x70bf591713d7cb7150523cf64add8d49fa6b61036bba9f596bd2af8e3bb86f9",
            L2Number::from(593128169u64),
            L2Number::from(7u64),
        ));
        assert_ne!(
            sign_l2_limit_order(L2_KEY, &plain).unwrap(),
            sign_l2_limit_order(L2_KEY, &with_fee).unwrap()
        );
    }

    #[test]
    fn test_invalid_key() {
        let err = sign_l2_limit_order("", &LimitOrderParams::new(order())).unwrap_err();
        assert!(err.is_key_error());
    }
}
