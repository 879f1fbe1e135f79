//! edgeX Exchange Signing
//!
//! - `auth`: 비공개 REST API 인증 헤더
//! - `l2`: StarkEx L2 메시지 서명

pub mod auth;
pub mod l2;

pub use auth::{
    construct_private_api_sign_string, generate_private_api_auth_headers, hash_and_reduce,
    hash_private_api_message, private_key_text, sign_private_api_request, AuthHeaders,
    ReducedHash, SignableParams, AUTH_SIGNATURE_HEX_LEN, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use l2::{
    derive_key_pair, hash_limit_order, hash_transfer, hash_withdrawal, limit_order_message,
    sign_l2, sign_l2_limit_order, sign_l2_transfer, sign_l2_withdrawal, transfer_message,
    withdrawal_message, L2Signature,
};
