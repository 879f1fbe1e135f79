//! StarkEx message hash construction
//!
//! 지정가 주문, 전송, 출금 메시지를 필드 패킹과 Pedersen 해시 체인으로 구성합니다.
//!
//! # 참조
//!
//! - [StarkEx Signatures](https://docs.starkware.co/starkex/perpetual/signatures.html)

use super::params::{FeeInfo, L2Number, LimitOrderParams, TransferParams, WithdrawalParams};
use crate::crypto::starknet::{hex_to_felt, pedersen_hash, pedersen_hash_packed};
use crate::errors::EdgexResult;
use num_bigint::BigUint;
use starknet_types_core::felt::Felt;

/// 출금 메시지 식별자 (StarkEx opcode)
pub const WITHDRAWAL_TO_ADDRESS_CONSTANT: u64 = 2;

const LIMIT_ORDER: u64 = 0;
const TRANSFER: u64 = 1;
const CONDITIONAL_TRANSFER: u64 = 2;
const LIMIT_ORDER_WITH_FEES: u64 = 3;
const TRANSFER_WITH_FEES: u64 = 4;
const CONDITIONAL_TRANSFER_WITH_FEES: u64 = 5;

const WITHDRAWAL_PADDING_BITS: u32 = 49;
const FEE_PADDING_BITS: u32 = 17;

/// 최상위 필드부터 왼쪽 시프트 후 더하는 패커
#[derive(Debug, Clone)]
struct Packer(BigUint);

impl Packer {
    fn seed(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    fn first(value: &L2Number, field: &str, bits: u32) -> EdgexResult<Self> {
        Ok(Self(value.checked(field, bits)?.clone()))
    }

    fn push(self, value: &L2Number, field: &str, bits: u32) -> EdgexResult<Self> {
        let value = value.checked(field, bits)?;
        Ok(Self((self.0 << bits) + value))
    }

    fn pad(self, bits: u32) -> Self {
        Self(self.0 << bits)
    }

    fn finish(self) -> BigUint {
        self.0
    }
}

/// 수수료 없는 메시지의 공통 필드
struct MessageFields<'a> {
    instruction: u64,
    vault0: &'a L2Number,
    vault1: &'a L2Number,
    amount0: &'a L2Number,
    amount1: &'a L2Number,
    nonce: &'a L2Number,
    expiration: &'a L2Number,
    token0: &'a str,
    token1_or_pub_key: &'a str,
    condition: Option<&'a str>,
}

/// 지정가 주문 메시지 해시 (필드 축약 전)
///
/// 수수료 없음: `(vaultIdSell, vaultIdBuy, amountSell, amountBuy, tokenSell, tokenBuy,
/// nonce, expirationTimestamp)`, 수수료 포함 시 `(feeTokenId, feeSourceVaultId, feeLimit)` 추가
pub fn limit_order_hash(params: &LimitOrderParams) -> EdgexResult<Felt> {
    let order = params.order();
    let fields = |instruction| MessageFields {
        instruction,
        vault0: &order.vault_id_sell,
        vault1: &order.vault_id_buy,
        amount0: &order.amount_sell,
        amount1: &order.amount_buy,
        nonce: &order.nonce,
        expiration: &order.expiration_timestamp,
        token0: &order.token_sell,
        token1_or_pub_key: &order.token_buy,
        condition: None,
    };

    match params {
        LimitOrderParams::NoFee(_) => message_hash(&fields(LIMIT_ORDER)),
        LimitOrderParams::WithFee { fee, .. } => {
            message_hash_with_fee(&fields(LIMIT_ORDER_WITH_FEES), fee)
        }
    }
}

/// 전송 메시지 해시 (필드 축약 전)
///
/// 조건이 있으면 조건부 전송 타입을 사용합니다.
pub fn transfer_hash(params: &TransferParams) -> EdgexResult<Felt> {
    let transfer = params.transfer();
    let zero = L2Number::from(0u64);
    let condition = transfer.condition.as_deref();
    let fields = |instruction| MessageFields {
        instruction,
        vault0: &transfer.sender_vault_id,
        vault1: &transfer.target_vault_id,
        amount0: &transfer.amount,
        amount1: &zero,
        nonce: &transfer.nonce,
        expiration: &transfer.expiration_timestamp,
        token0: &transfer.token,
        token1_or_pub_key: &transfer.target_public_key,
        condition,
    };

    match (params, condition) {
        (TransferParams::NoFee(_), None) => message_hash(&fields(TRANSFER)),
        (TransferParams::NoFee(_), Some(_)) => message_hash(&fields(CONDITIONAL_TRANSFER)),
        (TransferParams::WithFee { fee, .. }, None) => {
            message_hash_with_fee(&fields(TRANSFER_WITH_FEES), fee)
        }
        (TransferParams::WithFee { fee, .. }, Some(_)) => {
            message_hash_with_fee(&fields(CONDITIONAL_TRANSFER_WITH_FEES), fee)
        }
    }
}

/// 출금 패킹 필드 (마지막 49비트 시프트 전)
///
/// `2 → positionId(64) → nonce(32) → amount(64) → expirationTimestamp(32)`
pub fn pack_withdrawal_body(params: &WithdrawalParams) -> EdgexResult<BigUint> {
    Ok(Packer::seed(WITHDRAWAL_TO_ADDRESS_CONSTANT)
        .push(&params.position_id, "positionId", 64)?
        .push(&params.nonce, "nonce", 32)?
        .push(&params.amount, "amount", 64)?
        .push(&params.expiration_timestamp, "expirationTimestamp", 32)?
        .finish())
}

/// 출금 패킹 필드 (49비트 패딩 포함)
pub fn pack_withdrawal(params: &WithdrawalParams) -> EdgexResult<BigUint> {
    Ok(pack_withdrawal_body(params)? << WITHDRAWAL_PADDING_BITS)
}

/// 출금 메시지 해시
///
/// `pedersen(pedersen(assetIdCollateral, ethAddress), w5)`. Pedersen 결과는 이미
/// 필드 요소이므로 추가 축약하지 않습니다.
pub fn withdrawal_hash(params: &WithdrawalParams) -> EdgexResult<Felt> {
    let asset_id = hex_to_felt(
        &with_hex_prefix(&params.asset_id_collateral),
        "assetIdCollateral",
    )?;
    let eth_address = hex_to_felt(&with_hex_prefix(&params.eth_address), "ethAddress")?;
    let w5 = pack_withdrawal(params)?;

    let part1 = pedersen_hash(&asset_id, &eth_address);
    pedersen_hash_packed(&part1, &w5, "withdrawal.w5")
}

/// `0x` 접두사가 없으면 추가 (숫자는 변경하지 않음)
pub fn with_hex_prefix(value: &str) -> String {
    if value.starts_with("0x") || value.starts_with("0X") {
        value.to_string()
    } else {
        format!("0x{value}")
    }
}

fn message_hash(fields: &MessageFields<'_>) -> EdgexResult<Felt> {
    let packed = Packer::seed(fields.instruction)
        .push(fields.vault0, "vault0", 31)?
        .push(fields.vault1, "vault1", 31)?
        .push(fields.amount0, "amount0", 63)?
        .push(fields.amount1, "amount1", 63)?
        .push(fields.nonce, "nonce", 31)?
        .push(fields.expiration, "expirationTimestamp", 22)?
        .finish();

    let token0 = hex_to_felt(fields.token0, "token0")?;
    let token1 = hex_to_felt(fields.token1_or_pub_key, "token1OrPubKey")?;

    let mut acc = pedersen_hash(&token0, &token1);
    if let Some(condition) = fields.condition {
        acc = pedersen_hash(&acc, &hex_to_felt(condition, "condition")?);
    }
    pedersen_hash_packed(&acc, &packed, "packedMessage")
}

fn message_hash_with_fee(fields: &MessageFields<'_>, fee: &FeeInfo) -> EdgexResult<Felt> {
    let packed1 = Packer::first(fields.vault0, "vault0", 64)?
        .push(fields.vault1, "vault1", 64)?
        .push(&fee.fee_source_vault_id, "feeSourceVaultId", 64)?
        .push(fields.nonce, "nonce", 32)?
        .finish();

    let packed2 = Packer::seed(fields.instruction)
        .push(fields.amount0, "amount0", 64)?
        .push(fields.amount1, "amount1", 64)?
        .push(&fee.fee_limit, "feeLimit", 64)?
        .push(fields.expiration, "expirationTimestamp", 32)?
        .pad(FEE_PADDING_BITS)
        .finish();

    let token0 = hex_to_felt(fields.token0, "token0")?;
    let token1 = hex_to_felt(fields.token1_or_pub_key, "token1OrPubKey")?;
    let fee_token = hex_to_felt(&fee.fee_token_id, "feeTokenId")?;

    let mut acc = pedersen_hash(&pedersen_hash(&token0, &token1), &fee_token);
    if let Some(condition) = fields.condition {
        acc = pedersen_hash(&acc, &hex_to_felt(condition, "condition")?);
    }
    let acc = pedersen_hash_packed(&acc, &packed1, "packedMessage1")?;
    pedersen_hash_packed(&acc, &packed2, "packedMessage2")
}
