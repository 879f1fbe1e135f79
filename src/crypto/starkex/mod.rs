//! StarkEx L2 Messages
//!
//! StarkEx 결제 레이어 메시지 (지정가 주문, 전송, 출금)의 파라미터와 해시 구성.

mod hash;
mod params;

pub use hash::{
    limit_order_hash, pack_withdrawal, pack_withdrawal_body, transfer_hash, with_hex_prefix,
    withdrawal_hash, WITHDRAWAL_TO_ADDRESS_CONSTANT,
};
pub use params::{
    FeeInfo, FeePolicy, L2Number, LimitOrder, LimitOrderParams, LimitOrderRequest, Transfer,
    TransferParams, TransferRequest, WithdrawalParams,
};
