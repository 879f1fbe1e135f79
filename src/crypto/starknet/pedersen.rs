//! Pedersen Hash
//!
//! StarkEx 메시지 해시 구성에 사용하는 2입력 Pedersen 해시를 제공합니다.
//!
//! # 참조
//!
//! - [StarkEx Pedersen Hash](https://docs.starkware.co/starkex/crypto/pedersen-hash-function.html)

use super::curve::{biguint_to_felt, hex_to_felt};
use crate::errors::EdgexResult;
use num_bigint::BigUint;
use starknet_crypto::pedersen_hash as stark_pedersen_hash;
use starknet_types_core::felt::Felt;

/// Pedersen 해시 (2개 입력)
///
/// # Arguments
///
/// * `x` - 첫 번째 필드 요소
/// * `y` - 두 번째 필드 요소
///
/// # Returns
///
/// 해시 결과
pub fn pedersen_hash(x: &Felt, y: &Felt) -> Felt {
    stark_pedersen_hash(x, y)
}

/// 16진수 입력에 대한 Pedersen 해시
pub fn pedersen_hash_hex(x_hex: &str, y_hex: &str) -> EdgexResult<Felt> {
    let x = hex_to_felt(x_hex, "pedersen.x")?;
    let y = hex_to_felt(y_hex, "pedersen.y")?;
    Ok(pedersen_hash(&x, &y))
}

/// 누적 해시와 패킹된 정수의 Pedersen 해시
pub(crate) fn pedersen_hash_packed(acc: &Felt, packed: &BigUint, field: &str) -> EdgexResult<Felt> {
    let packed = biguint_to_felt(packed, field)?;
    Ok(pedersen_hash(acc, &packed))
}
