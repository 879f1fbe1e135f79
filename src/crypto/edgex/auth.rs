//! edgeX Private API Authentication
//!
//! 비공개 REST API 요청의 `X-edgeX-Api-Timestamp` / `X-edgeX-Api-Signature` 헤더를 생성합니다.
//!
//! 서명 문자열 = `timestamp + METHOD + path + canonical(params | body)`,
//! 서명 스칼라 = `keccak256(서명 문자열) mod EC_ORDER`,
//! 서명 헤더 = `r ‖ s ‖ y` (각 64자리 hex).

use crate::crypto::keccak::{keccak256, keccak256_hash};
use crate::crypto::starknet::{
    biguint_to_felt, felt_to_padded_hex, reduce_to_field, StarkKeyPair, COMPONENT_HEX_LEN,
};
use crate::errors::{EdgexError, EdgexResult};
use crate::utils::{encode_signable, Clock, DebugEvent, DebugSink, NoopSink, SystemClock};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 타임스탬프 헤더 이름
pub const TIMESTAMP_HEADER: &str = "X-edgeX-Api-Timestamp";

/// 서명 헤더 이름
pub const SIGNATURE_HEADER: &str = "X-edgeX-Api-Signature";

/// 인증 서명 길이 (r, s, y 각 64자리)
pub const AUTH_SIGNATURE_HEX_LEN: usize = COMPONENT_HEX_LEN * 3;

/// 서명 대상 파라미터
#[derive(Debug, Clone, PartialEq)]
pub enum SignableParams {
    /// GET 쿼리 파라미터 (정렬된 `key=value&...`로 인코딩)
    Query(Value),
    /// POST/PUT 바디 (이미 정규화된 문자열, 그대로 사용)
    Body(String),
}

impl SignableParams {
    /// 서명 문자열에 들어갈 정규 문자열
    pub fn canonical(&self) -> String {
        match self {
            SignableParams::Query(value) => encode_signable(value, true),
            SignableParams::Body(body) => body.clone(),
        }
    }
}

impl From<Value> for SignableParams {
    fn from(value: Value) -> Self {
        match value {
            Value::String(body) => SignableParams::Body(body),
            other => SignableParams::Query(other),
        }
    }
}

impl From<String> for SignableParams {
    fn from(body: String) -> Self {
        SignableParams::Body(body)
    }
}

impl From<&str> for SignableParams {
    fn from(body: &str) -> Self {
        SignableParams::Body(body.to_string())
    }
}

/// 인증 헤더
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthHeaders {
    #[serde(rename = "X-edgeX-Api-Timestamp")]
    pub timestamp: String,
    #[serde(rename = "X-edgeX-Api-Signature")]
    pub signature: String,
}

impl AuthHeaders {
    /// HTTP 헤더 맵으로 변환
    pub fn into_header_map(self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(TIMESTAMP_HEADER.to_string(), self.timestamp);
        headers.insert(SIGNATURE_HEADER.to_string(), self.signature);
        headers
    }
}

/// Keccak 해시와 축약 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedHash {
    /// `0x` + 64자리 Keccak256 digest
    pub hashed: String,
    /// `digest mod EC_ORDER`
    pub scalar: BigUint,
}

impl ReducedHash {
    /// 최소 자릿수 소문자 hex (패딩 없음, 접두사 없음)
    pub fn scalar_hex(&self) -> String {
        self.scalar.to_str_radix(16)
    }
}

/// 서명 문자열 구성
///
/// 구분자 없이 `timestamp + METHOD + path + paramsOrBody`를 연결합니다.
pub fn construct_private_api_sign_string(
    timestamp: &str,
    method: &str,
    request_path: &str,
    params_or_body: Option<&str>,
) -> String {
    format!(
        "{timestamp}{}{request_path}{}",
        method.to_uppercase(),
        params_or_body.unwrap_or_default()
    )
}

/// 서명 문자열의 Keccak256 해시 (`0x` + 64자리)
pub fn hash_private_api_message(message: &str) -> String {
    keccak256_hash(message.as_bytes())
}

/// Keccak256 해시 후 곡선 위수로 축약
pub fn hash_and_reduce(message: &str) -> ReducedHash {
    let digest = keccak256(message.as_bytes());
    ReducedHash {
        hashed: format!("0x{}", hex::encode(digest)),
        scalar: reduce_to_field(&BigUint::from_bytes_be(&digest)),
    }
}

/// JSON 값에서 개인키 문자열 추출
///
/// 문자열이 아니면 `InvalidKeyType`, 비어 있으면 `InvalidKeyValue`
pub fn private_key_text(value: &Value) -> EdgexResult<&str> {
    let key = value.as_str().ok_or_else(|| EdgexError::InvalidKeyType {
        message: format!("Private key must be a string, got {}", json_type_name(value)),
    })?;
    if key.trim().is_empty() {
        return Err(EdgexError::InvalidKeyValue {
            message: "Private key is empty".into(),
        });
    }
    Ok(key)
}

/// 비공개 API 인증 헤더 생성 (시스템 시계 사용)
///
/// # Arguments
///
/// * `l1_private_key` - 16진수 개인키 (`0x` 선택)
/// * `method` - HTTP 메서드
/// * `path` - 쿼리 문자열 없는 요청 경로
/// * `params` - 실제 전송되는 쿼리 파라미터 또는 바디
pub fn generate_private_api_auth_headers(
    l1_private_key: &str,
    method: &str,
    path: &str,
    params: Option<&SignableParams>,
) -> EdgexResult<AuthHeaders> {
    let key_pair = StarkKeyPair::from_private_key_hex(l1_private_key)?;
    sign_private_api_request(&key_pair, method, path, params, &SystemClock, &NoopSink)
}

/// 주어진 키 쌍, 시계, 디버그 싱크로 인증 헤더 생성
///
/// 시계는 정확히 한 번 읽으며 같은 값이 서명 문자열과 헤더에 쓰입니다.
pub fn sign_private_api_request(
    key_pair: &StarkKeyPair,
    method: &str,
    path: &str,
    params: Option<&SignableParams>,
    clock: &dyn Clock,
    sink: &dyn DebugSink,
) -> EdgexResult<AuthHeaders> {
    let timestamp = clock.now_ms().to_string();

    let canonical = params.map(SignableParams::canonical);
    let message = construct_private_api_sign_string(&timestamp, method, path, canonical.as_deref());
    sink.record(&DebugEvent::AuthMessage {
        timestamp: timestamp.clone(),
        message: message.clone(),
    });

    let reduced = hash_and_reduce(&message);
    sink.record(&DebugEvent::AuthHash {
        hashed: reduced.hashed.clone(),
        reduced: reduced.scalar_hex(),
    });

    let scalar = biguint_to_felt(&reduced.scalar, "messageHash")?;
    let signature = key_pair.sign(&scalar)?;

    let serialized = format!(
        "{}{}{}",
        signature.r_hex(),
        signature.s_hex(),
        felt_to_padded_hex(key_pair.public_key_y())
    );
    if serialized.len() != AUTH_SIGNATURE_HEX_LEN {
        return Err(EdgexError::SignatureLengthError {
            expected: AUTH_SIGNATURE_HEX_LEN,
            actual: serialized.len(),
        });
    }
    sink.record(&DebugEvent::signed(
        "auth",
        key_pair.public_key_hex(),
        &serialized,
    ));

    Ok(AuthHeaders {
        timestamp,
        signature: serialized,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::starknet::{ec_order, StarkSignature};
    use crate::utils::FixedClock;
    use serde_json::json;
    use starknet_types_core::felt::Felt;

    const TEST_KEY: &str = "0x3c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc";

    #[test]
    fn test_sign_string_concatenation() {
        let message =
            construct_private_api_sign_string("1700000000000", "get", "/api/v1/x", Some("a=1"));
        assert_eq!(message, "1700000000000GET/api/v1/xa=1");

        let message = construct_private_api_sign_string("1", "post", "/p", None);
        assert_eq!(message, "1POST/p");
    }

    #[test]
    fn test_hash_private_api_message() {
        let hash = hash_private_api_message("hello");
        assert_eq!(
            hash,
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
        assert_eq!(hash, hash_private_api_message("hello"));
        assert_ne!(hash, hash_private_api_message("hello!"));
    }

    #[test]
    fn test_hash_and_reduce_below_order() {
        for message in ["", "a", "1700000000000GET/api/v1/xa=1", "hello"] {
            let reduced = hash_and_reduce(message);
            assert!(reduced.scalar < *ec_order());
            assert_eq!(reduced.hashed, hash_private_api_message(message));
            assert!(!reduced.scalar_hex().starts_with('0') || reduced.scalar_hex() == "0");
        }
    }

    #[test]
    fn test_signable_params_from_value() {
        assert_eq!(
            SignableParams::from(json!("a=1&b=2")),
            SignableParams::Body("a=1&b=2".into())
        );
        let query = SignableParams::from(json!({"b": 2, "a": 1}));
        assert_eq!(query.canonical(), "a=1&b=2");
    }

    #[test]
    fn test_headers_with_fixed_clock() {
        let key_pair = StarkKeyPair::from_private_key_hex(TEST_KEY).unwrap();
        let params = SignableParams::from(json!({"accountId": "12345", "size": "10"}));
        let clock = FixedClock(1_700_000_000_000);

        let headers = sign_private_api_request(
            &key_pair,
            "GET",
            "/api/v1/private/account/getPositionByAccountId",
            Some(&params),
            &clock,
            &NoopSink,
        )
        .unwrap();

        assert_eq!(headers.timestamp, "1700000000000");
        assert_eq!(headers.signature.len(), AUTH_SIGNATURE_HEX_LEN);
        assert!(headers
            .signature
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        // r, s는 축약된 Keccak 해시에 대한 유효한 서명
        let message = construct_private_api_sign_string(
            "1700000000000",
            "GET",
            "/api/v1/private/account/getPositionByAccountId",
            Some("accountId=12345&size=10"),
        );
        let scalar = biguint_to_felt(&hash_and_reduce(&message).scalar, "m").unwrap();
        let signature =
            StarkSignature::from_hex(&headers.signature[..64], &headers.signature[64..128])
                .unwrap();
        assert!(key_pair.verify(&scalar, &signature).unwrap());

        // y 좌표
        let y = Felt::from_hex(&format!("0x{}", &headers.signature[128..])).unwrap();
        assert_eq!(y, *key_pair.public_key_y());
    }

    #[test]
    fn test_headers_deterministic_for_fixed_clock() {
        let key_pair = StarkKeyPair::from_private_key_hex(TEST_KEY).unwrap();
        let clock = FixedClock(1_700_000_000_123);
        let body = SignableParams::from("price=1&size=2");

        let a = sign_private_api_request(&key_pair, "POST", "/o", Some(&body), &clock, &NoopSink)
            .unwrap();
        let b = sign_private_api_request(&key_pair, "post", "/o", Some(&body), &clock, &NoopSink)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_header_map() {
        let headers = AuthHeaders {
            timestamp: "1".into(),
            signature: "ab".into(),
        };
        let json = serde_json::to_value(&headers).unwrap();
        assert_eq!(json[TIMESTAMP_HEADER], "1");

        let map = headers.into_header_map();
        assert_eq!(map.get(SIGNATURE_HEADER).map(String::as_str), Some("ab"));
    }

    #[test]
    fn test_private_key_text() {
        assert!(matches!(
            private_key_text(&json!(12345)),
            Err(EdgexError::InvalidKeyType { .. })
        ));
        assert!(matches!(
            private_key_text(&json!(null)),
            Err(EdgexError::InvalidKeyType { .. })
        ));
        assert!(matches!(
            private_key_text(&json!("   ")),
            Err(EdgexError::InvalidKeyValue { .. })
        ));
        assert_eq!(private_key_text(&json!("0xabc")).unwrap(), "0xabc");
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = generate_private_api_auth_headers(" ", "GET", "/x", None).unwrap_err();
        assert!(matches!(err, EdgexError::InvalidKeyValue { .. }));
    }
}
