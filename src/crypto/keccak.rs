//! Keccak256 hashing utilities
//!
//! 인증 메시지 해싱에 사용하는 Keccak256 해시 함수를 제공합니다.

use sha3::{Digest, Keccak256};

/// 데이터의 Keccak256 해시를 계산합니다.
///
/// # Arguments
///
/// * `data` - 해시할 데이터
///
/// # Returns
///
/// 32바이트 해시 값
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// 데이터의 Keccak256 해시를 hex 문자열로 반환합니다.
///
/// # Returns
///
/// 0x 접두사가 포함된 64자리 hex 문자열
///
/// # Example
///
/// ```rust
/// use edgex_signer::crypto::keccak256_hash;
///
/// let hash = keccak256_hash(b"hello");
/// assert!(hash.starts_with("0x"));
/// assert_eq!(hash.len(), 66);
/// ```
pub fn keccak256_hash(data: &[u8]) -> String {
    format!("0x{}", hex::encode(keccak256(data)))
}
