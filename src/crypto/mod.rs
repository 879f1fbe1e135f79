//! Cryptographic Utilities
//!
//! edgeX 인증 및 StarkEx L2 서명을 위한 암호화 기능을 제공합니다.
//!
//! # 모듈 구조
//!
//! - `keccak`: Keccak256 해시
//! - `starknet`: STARK 곡선 (Pedersen, ECDSA, 키 쌍)
//! - `starkex`: StarkEx 메시지 파라미터와 해시 구성
//! - `edgex`: 비공개 API 인증 헤더와 L2 메시지 서명
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use edgex_signer::crypto::edgex::{sign_l2_limit_order, generate_private_api_auth_headers};
//!
//! // 인증 헤더
//! let headers = generate_private_api_auth_headers(&l1_key, "GET", "/api/v1/private/account", None)?;
//!
//! // 주문 서명
//! let signature = sign_l2_limit_order(&l2_key, &order)?;
//! println!("r={} s={}", signature.r, signature.s);
//! ```

pub mod edgex;
pub mod keccak;
pub mod starkex;
pub mod starknet;

pub use keccak::{keccak256, keccak256_hash};
pub use starknet::{pedersen_hash, StarkKeyPair, StarkSignature};
