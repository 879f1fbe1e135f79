//! Integration tests for StarkEx L2 signing
//!
//! Limit orders, transfers and withdrawals through the public API

use edgex_signer::crypto::edgex::{
    derive_key_pair, hash_limit_order, hash_transfer, hash_withdrawal, limit_order_message, transfer_message, withdrawal_message,
};
use edgex_signer::crypto::starkex::{pack_withdrawal_body, LimitOrderRequest, TransferRequest};
use edgex_signer::{
    sign_l2_limit_order, sign_l2_transfer, sign_l2_withdrawal, EdgexError, FeeInfo, FeePolicy,
    L2Number, LimitOrder, LimitOrderParams, Transfer, TransferParams, WithdrawalParams,
};
use num_bigint::BigUint;
use serde_json::json;

const L2_KEY: &str = "0x3c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc";
const FEE_TOKEN: &str = "0x70bf591713d7cb7150523cf64add8d49fa6b61036bba9f596bd2af8e3bb86f9";

fn limit_order() -> LimitOrder {
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

fn transfer() -> Transfer {
    Transfer {
        amount: 2154549703648910716u64.into(),
        nonce: 1u64.into(),
        sender_vault_id: 34u64.into(),
        token: "0x3003a65651d3b9fb2eff934a4416db301afd112a8492aaf8d7297fc87dcd9f4".into(),
        target_vault_id: 21u64.into(),
        target_public_key: "0x5fa3383597691ea9d827a79e1a4f0f7989c35ced18ca9619de8ab97e661020"
            .into(),
        expiration_timestamp: 438953u64.into(),
        condition: None,
    }
}

fn withdrawal() -> WithdrawalParams {
    WithdrawalParams {
        asset_id_collateral: "0x2893294412a4c8f915f75892b395ebbf6859ec246ec365c3b1f56f47c3a0a5d"
            .into(),
        eth_address: "0x0b6e6e0b3a2e7f3d0ffe2bd9a7e0a1a2f3b4c5d6".into(),
        position_id: 12345u64.into(),
        nonce: 7u64.into(),
        amount: 1000000u64.into(),
        expiration_timestamp: 475000u64.into(),
    }
}

fn fee() -> FeeInfo {
    FeeInfo::new(FEE_TOKEN, 593128169u64, 7u64)
}

fn is_lower_hex_64(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

// === Shape & Verifiability ===

#[test]
fn test_signature_shapes() {
    let order = sign_l2_limit_order(L2_KEY, &LimitOrderParams::new(limit_order())).unwrap();
    let transfer = sign_l2_transfer(L2_KEY, &TransferParams::new(transfer())).unwrap();
    let withdrawal = sign_l2_withdrawal(L2_KEY, &withdrawal()).unwrap();

    for signature in [order, transfer, withdrawal] {
        assert!(is_lower_hex_64(&signature.r));
        assert!(is_lower_hex_64(&signature.s));
    }
}

#[test]
fn test_signatures_verify() {
    let key_pair = derive_key_pair(L2_KEY).unwrap();

    let order = LimitOrderParams::new(limit_order()).with_fee(fee());
    let signature = sign_l2_limit_order(L2_KEY, &order).unwrap();
    let hash = limit_order_message(&order).unwrap();
    assert!(key_pair.verify(&hash, &signature.to_stark().unwrap()).unwrap());

    let params = TransferParams::new(transfer());
    let signature = sign_l2_transfer(L2_KEY, &params).unwrap();
    let hash = transfer_message(&params).unwrap();
    assert!(key_pair.verify(&hash, &signature.to_stark().unwrap()).unwrap());

    let signature = sign_l2_withdrawal(L2_KEY, &withdrawal()).unwrap();
    let hash = withdrawal_message(&withdrawal()).unwrap();
    assert!(key_pair.verify(&hash, &signature.to_stark().unwrap()).unwrap());
}

#[test]
fn test_deterministic_signing() {
    assert_eq!(
        sign_l2_withdrawal(L2_KEY, &withdrawal()).unwrap(),
        sign_l2_withdrawal(L2_KEY, &withdrawal()).unwrap()
    );
}

// === Fixed Vectors ===

#[test]
fn test_hash_known_vectors() {
    assert_eq!(
        hash_limit_order(&LimitOrderParams::new(limit_order())).unwrap(),
        "0x397e76d1667c4454bfb83514e120583af836f8e32a516765497823eabe16a3f"
    );
    assert_eq!(
        hash_limit_order(&LimitOrderParams::new(limit_order()).with_fee(fee())).unwrap(),
        "0x1b60065f03cccf3226dbeaf497516bc70a4fa5753222af44be085fc35f4b6e6"
    );
    assert_eq!(
        hash_transfer(&TransferParams::new(transfer())).unwrap(),
        "0x20703ebcadb328f077e9a072eeb61a57a8dfca790f5c93feb1b5146a28c52f8"
    );
    assert_eq!(
        hash_transfer(&TransferParams::new(transfer()).with_fee(fee())).unwrap(),
        "0x21aabccfdbb144e811ea920da3a33b49c48a3662b00166618b0ced61564876a"
    );
    assert_eq!(
        hash_withdrawal(&withdrawal()).unwrap(),
        "0x1eddd748685c99428716091daf7bb2de433004fce3d28d23b1a7ef56030c81"
    );
}

// === Fee Variants ===

#[test]
fn test_fee_selects_different_hash() {
    let plain = sign_l2_transfer(L2_KEY, &TransferParams::new(transfer())).unwrap();
    let with_fee =
        sign_l2_transfer(L2_KEY, &TransferParams::new(transfer()).with_fee(fee())).unwrap();
    assert_ne!(plain, with_fee);
}

#[test]
fn test_partial_fee_rejected_by_default() {
    let mut request = serde_json::to_value(limit_order()).unwrap();
    request["feeLimit"] = json!("7");
    let request: LimitOrderRequest = serde_json::from_value(request).unwrap();

    match request.into_params(FeePolicy::default()) {
        Err(EdgexError::PartialFeeParams { present }) => assert!(present.contains("feeLimit")),
        other => panic!("expected PartialFeeParams, got {other:?}"),
    }
}

#[test]
fn test_partial_fee_fallback_matches_no_fee() {
    let mut request = serde_json::to_value(transfer()).unwrap();
    request["feeTokenId"] = json!(FEE_TOKEN);
    request["feeSourceVaultId"] = json!(593128169u64);
    let request: TransferRequest = serde_json::from_value(request).unwrap();

    let params = request.into_params(FeePolicy::FallbackToNoFee).unwrap();
    assert_eq!(
        sign_l2_transfer(L2_KEY, &params).unwrap(),
        sign_l2_transfer(L2_KEY, &TransferParams::new(transfer())).unwrap()
    );
}

#[test]
fn test_string_and_numeric_inputs_agree() {
    let mut order = limit_order();
    order.vault_id_sell = "21".parse::<L2Number>().unwrap();
    assert_eq!(
        sign_l2_limit_order(L2_KEY, &LimitOrderParams::new(order)).unwrap(),
        sign_l2_limit_order(L2_KEY, &LimitOrderParams::new(limit_order())).unwrap()
    );
}

// === Withdrawal Packing ===

#[test]
fn test_withdrawal_packing_manual() {
    let expected = ((((BigUint::from(2u32) << 64u32) + 12345u32) << 32u32) + 7u32) << 64u32;
    let expected = ((expected + 1000000u32) << 32u32) + 475000u32;
    assert_eq!(pack_withdrawal_body(&withdrawal()).unwrap(), expected);
}

#[test]
fn test_withdrawal_overflow_detected() {
    let mut params = withdrawal();
    params.nonce = L2Number::from(1u64 << 32);
    assert!(matches!(
        hash_withdrawal(&params),
        Err(EdgexError::FieldOverflow { .. })
    ));
    assert!(sign_l2_withdrawal(L2_KEY, &params).is_err());
}

// === Key Errors ===

#[test]
fn test_invalid_l2_key() {
    let err = sign_l2_withdrawal("   ", &withdrawal()).unwrap_err();
    assert!(matches!(err, EdgexError::InvalidKeyValue { .. }));
}
