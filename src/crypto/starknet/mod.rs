//! STARK Curve Cryptography Module
//!
//! StarkEx L2를 위한 암호화 유틸리티를 제공합니다.
//!
//! # 주요 기능
//!
//! - Pedersen 해싱
//! - STARK ECDSA 서명 및 검증
//! - 개인키 정규화 및 키 쌍 파생

mod curve;
mod pedersen;

pub use curve::{
    biguint_to_felt, ec_order, felt_to_biguint, felt_to_hex, felt_to_padded_hex, hex_to_felt,
    normalize_private_key, reduce_to_field, sign_hash, verify_signature, StarkKeyPair,
    StarkSignature, COMPONENT_HEX_LEN, EC_ORDER_HEX, PRIVATE_KEY_HEX_LEN,
};
pub use pedersen::{pedersen_hash, pedersen_hash_hex};
pub(crate) use pedersen::pedersen_hash_packed;
