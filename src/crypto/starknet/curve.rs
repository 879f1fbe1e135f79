//! STARK Curve Operations
//!
//! StarkEx가 사용하는 STARK 곡선의 키 쌍, ECDSA 서명 및 검증을 제공합니다.
//!
//! # 참조
//!
//! - [StarkEx Signatures](https://docs.starkware.co/starkex/crypto/signatures.html)

use crate::errors::{EdgexError, EdgexResult};
use num_bigint::BigUint;
use num_traits::{Num, Zero};
use once_cell::sync::Lazy;
use starknet_crypto::{rfc6979_generate_k, sign, verify};
use starknet_types_core::curve::ProjectivePoint;
use starknet_types_core::felt::Felt;
use std::fmt;

/// STARK 곡선 위수 (서명 스칼라 필드 모듈러스)
pub const EC_ORDER_HEX: &str = "0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f";

/// 개인키 hex 길이 (256비트)
pub const PRIVATE_KEY_HEX_LEN: usize = 64;

/// 서명 구성요소 hex 길이
pub const COMPONENT_HEX_LEN: usize = 64;

/// 서명 가능한 메시지 해시의 상한 비트 수
pub const MAX_MESSAGE_BITS: u64 = 251;

static EC_ORDER: Lazy<BigUint> = Lazy::new(|| {
    BigUint::from_str_radix(EC_ORDER_HEX, 16).unwrap_or_else(|_| BigUint::zero())
});

const GENERATOR_X: Felt =
    Felt::from_hex_unchecked("0x1ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca");
const GENERATOR_Y: Felt =
    Felt::from_hex_unchecked("0x5668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f");

const MAX_NONCE_ATTEMPTS: u32 = 16;

/// STARK 곡선 위수
pub fn ec_order() -> &'static BigUint {
    &EC_ORDER
}

/// 값을 곡선 위수로 나눈 나머지
pub fn reduce_to_field(value: &BigUint) -> BigUint {
    value % ec_order()
}

/// STARK 서명
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarkSignature {
    /// r 값
    pub r: Felt,
    /// s 값
    pub s: Felt,
}

impl StarkSignature {
    /// 새 서명 생성
    pub fn new(r: Felt, s: Felt) -> Self {
        Self { r, s }
    }

    /// r 값 (64자리, 접두사 없음)
    pub fn r_hex(&self) -> String {
        felt_to_padded_hex(&self.r)
    }

    /// s 값 (64자리, 접두사 없음)
    pub fn s_hex(&self) -> String {
        felt_to_padded_hex(&self.s)
    }

    /// 16진수 문자열로 변환 (0x 접두사 포함)
    pub fn to_hex(&self) -> (String, String) {
        (format!("0x{}", self.r_hex()), format!("0x{}", self.s_hex()))
    }

    /// 16진수 문자열에서 생성
    pub fn from_hex(r_hex: &str, s_hex: &str) -> EdgexResult<Self> {
        Ok(Self {
            r: hex_to_felt(r_hex, "r")?,
            s: hex_to_felt(s_hex, "s")?,
        })
    }
}

/// STARK 키 쌍
///
/// 개인키 hex 문자열에서만 생성됩니다. 공개키의 x, y 좌표는 생성 시 한 번 계산됩니다.
#[derive(Clone, PartialEq, Eq)]
pub struct StarkKeyPair {
    private_key: Felt,
    public_x: Felt,
    public_y: Felt,
}

impl fmt::Debug for StarkKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StarkKeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &felt_to_hex(&self.public_x))
            .finish()
    }
}

impl StarkKeyPair {
    /// 16진수 개인키로 키 쌍 생성
    ///
    /// `0x` 접두사를 제거하고 64자리로 왼쪽 패딩한 뒤 곡선 위수로 축약합니다.
    pub fn from_private_key_hex(private_key_hex: &str) -> EdgexResult<Self> {
        let normalized = normalize_private_key(private_key_hex)?;
        Self::from_normalized_hex(&normalized)
    }

    /// 이미 정규화된 64자리 hex 개인키로 생성
    pub(crate) fn from_normalized_hex(normalized: &str) -> EdgexResult<Self> {
        let scalar = BigUint::from_str_radix(normalized, 16).map_err(|e| {
            EdgexError::InvalidKeyValue {
                message: format!("Invalid hex private key: {e}"),
            }
        })?;
        let scalar = reduce_to_field(&scalar);
        if scalar.is_zero() {
            return Err(EdgexError::InvalidKeyValue {
                message: "Private key reduces to zero".into(),
            });
        }

        let private_key = biguint_to_felt(&scalar, "privateKey")?;
        let (public_x, public_y) = derive_public_point(&private_key)?;

        Ok(Self {
            private_key,
            public_x,
            public_y,
        })
    }

    /// 공개키 (x 좌표)
    pub fn public_key(&self) -> &Felt {
        &self.public_x
    }

    /// 공개키 y 좌표
    pub fn public_key_y(&self) -> &Felt {
        &self.public_y
    }

    /// 공개키 16진수 반환
    pub fn public_key_hex(&self) -> String {
        felt_to_hex(&self.public_x)
    }

    /// 메시지 해시 서명
    pub fn sign(&self, message_hash: &Felt) -> EdgexResult<StarkSignature> {
        sign_hash(&self.private_key, message_hash)
    }

    /// 이 키 쌍의 공개키로 서명 검증
    pub fn verify(&self, message_hash: &Felt, signature: &StarkSignature) -> EdgexResult<bool> {
        verify_signature(&self.public_x, message_hash, signature)
    }
}

/// 개인키 문자열 정규화
///
/// 공백 제거, `0x` 제거, 소문자화, 64자리 왼쪽 0 패딩
pub fn normalize_private_key(private_key: &str) -> EdgexResult<String> {
    let trimmed = private_key.trim();
    if trimmed.is_empty() {
        return Err(EdgexError::InvalidKeyValue {
            message: "Private key is empty".into(),
        });
    }

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EdgexError::InvalidKeyValue {
            message: "Private key must be a hex string".into(),
        });
    }
    if digits.len() > PRIVATE_KEY_HEX_LEN {
        return Err(EdgexError::InvalidKeyValue {
            message: format!(
                "Private key longer than {PRIVATE_KEY_HEX_LEN} hex chars: {}",
                digits.len()
            ),
        });
    }

    Ok(format!(
        "{:0>width$}",
        digits.to_ascii_lowercase(),
        width = PRIVATE_KEY_HEX_LEN
    ))
}

/// 메시지 해시에 서명 (RFC 6979 결정적 k)
///
/// # Arguments
///
/// * `private_key` - STARK 개인키
/// * `message_hash` - 서명할 메시지 해시 (2^251 미만)
pub fn sign_hash(private_key: &Felt, message_hash: &Felt) -> EdgexResult<StarkSignature> {
    if felt_to_biguint(message_hash).bits() > MAX_MESSAGE_BITS {
        return Err(EdgexError::InvalidSignature {
            message: format!(
                "Message hash {} exceeds {MAX_MESSAGE_BITS} bits",
                felt_to_hex(message_hash)
            ),
        });
    }

    let mut seed: Option<Felt> = None;
    let mut last_error = String::new();
    for _ in 0..MAX_NONCE_ATTEMPTS {
        let k = rfc6979_generate_k(message_hash, private_key, seed.as_ref());
        match sign(private_key, message_hash, &k) {
            Ok(signature) => return Ok(StarkSignature::new(signature.r, signature.s)),
            Err(e) => {
                // 유효하지 않은 k: 시드를 증가시켜 재시도
                last_error = format!("{e:?}");
                seed = Some(seed.map_or(Felt::ONE, |s| s + Felt::ONE));
            }
        }
    }

    Err(EdgexError::InvalidSignature {
        message: format!("STARK signing failed: {last_error}"),
    })
}

/// 서명 검증
///
/// # Arguments
///
/// * `public_key` - STARK 공개키 (x 좌표)
/// * `message_hash` - 서명된 메시지 해시
/// * `signature` - 검증할 서명
pub fn verify_signature(
    public_key: &Felt,
    message_hash: &Felt,
    signature: &StarkSignature,
) -> EdgexResult<bool> {
    verify(public_key, message_hash, &signature.r, &signature.s).map_err(|e| {
        EdgexError::InvalidSignature {
            message: format!("STARK verification failed: {e:?}"),
        }
    })
}

/// 개인키에서 공개키 점 (x, y) 파생
fn derive_public_point(private_key: &Felt) -> EdgexResult<(Felt, Felt)> {
    let generator = ProjectivePoint::from_affine(GENERATOR_X, GENERATOR_Y).map_err(|e| {
        EdgexError::InvalidKeyValue {
            message: format!("Invalid curve generator: {e:?}"),
        }
    })?;
    let point = (&generator * *private_key)
        .to_affine()
        .map_err(|e| EdgexError::InvalidKeyValue {
            message: format!("Public key is the point at infinity: {e:?}"),
        })?;
    Ok((point.x(), point.y()))
}

/// Felt를 BigUint로 변환
pub fn felt_to_biguint(felt: &Felt) -> BigUint {
    BigUint::from_bytes_be(&felt.to_bytes_be())
}

/// BigUint를 Felt로 변환 (필드 소수보다 작아야 함)
pub fn biguint_to_felt(value: &BigUint, field: &str) -> EdgexResult<Felt> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return Err(EdgexError::FieldOverflow {
            field: field.into(),
            bits: 256,
            value: format!("0x{}", value.to_str_radix(16)),
        });
    }

    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    let felt = Felt::from_bytes_be(&padded);

    // from_bytes_be는 필드 소수로 축약하므로 왕복이 같아야 함
    if felt_to_biguint(&felt) != *value {
        return Err(EdgexError::FieldOverflow {
            field: field.into(),
            bits: MAX_MESSAGE_BITS as u32 + 1,
            value: format!("0x{}", value.to_str_radix(16)),
        });
    }
    Ok(felt)
}

/// Felt를 16진수 문자열로 변환 (최소 자릿수, 0x 접두사)
pub fn felt_to_hex(felt: &Felt) -> String {
    format!("0x{}", felt_to_biguint(felt).to_str_radix(16))
}

/// Felt를 64자리 16진수 문자열로 변환 (접두사 없음)
pub fn felt_to_padded_hex(felt: &Felt) -> String {
    hex::encode(felt.to_bytes_be())
}

/// 16진수 문자열을 Felt로 변환 (0x 접두사 선택, 필드 소수 미만)
///
/// Pedersen 입력용입니다. 서명할 메시지 해시의 2^251 상한은 [`sign_hash`]에서 확인합니다.
pub fn hex_to_felt(hex_str: &str, field: &str) -> EdgexResult<Felt> {
    let digits = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);

    if digits.is_empty() {
        return Err(EdgexError::invalid_parameter(field, "empty hex value"));
    }

    let value = BigUint::from_str_radix(digits, 16)
        .map_err(|e| EdgexError::invalid_parameter(field, format!("invalid hex: {e}")))?;

    biguint_to_felt(&value, field)
}
