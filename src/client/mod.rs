//! Signer client and related utilities

mod cache;
mod config;
mod signer;

pub use cache::{CacheStats, KeyPairCache};
pub use config::SignerConfig;
pub use signer::EdgexSigner;
