//! edgeX Signer: edgeX 비공개 API 인증 및 StarkEx L2 메시지 서명
//!
//! - 비공개 REST 요청용 `X-edgeX-Api-Timestamp` / `X-edgeX-Api-Signature` 헤더
//! - 지정가 주문, 전송, 출금 메시지의 STARK 서명
//!
//! 네트워크 입출력은 하지 않습니다. 모든 연산은 동기적이며 입력만으로 결정됩니다
//! (인증 헤더의 타임스탬프 제외).

pub mod client;
pub mod crypto;
pub mod errors;
pub mod utils;

// Re-exports
pub use client::{EdgexSigner, KeyPairCache, SignerConfig};
pub use crypto::edgex::{
    construct_private_api_sign_string, generate_private_api_auth_headers, hash_private_api_message,
    sign_l2_limit_order, sign_l2_transfer, sign_l2_withdrawal, AuthHeaders, L2Signature,
    SignableParams,
};
pub use crypto::starkex::{
    FeeInfo, FeePolicy, L2Number, LimitOrder, LimitOrderParams, Transfer, TransferParams,
    WithdrawalParams,
};
pub use errors::{EdgexError, EdgexResult};
pub use utils::{convert_request_body_to_string, encode_signable};
