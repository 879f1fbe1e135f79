//! Debug side-channel for signing
//!
//! 서명 과정의 중간값을 기록하는 선택적 싱크. 기본값은 아무것도 하지 않으며,
//! 싱크는 개인키를 절대 전달받지 않습니다.

use std::fmt;

/// 서명 과정 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugEvent {
    /// Private API sign string assembled
    AuthMessage { timestamp: String, message: String },
    /// Keccak digest and its reduction
    AuthHash { hashed: String, reduced: String },
    /// L2 message hash computed
    L2Hash { kind: &'static str, hash: String },
    /// Signature produced (redacted)
    Signed {
        kind: &'static str,
        public_key: String,
        signature_prefix: String,
    },
}

impl DebugEvent {
    /// 서명 완료 이벤트 (서명값은 앞 8자리만 유지)
    pub fn signed(kind: &'static str, public_key: String, signature: &str) -> Self {
        DebugEvent::Signed {
            kind,
            public_key,
            signature_prefix: redact(signature),
        }
    }
}

impl fmt::Display for DebugEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebugEvent::AuthMessage { timestamp, message } => {
                write!(f, "auth message ts={timestamp} message={message}")
            }
            DebugEvent::AuthHash { hashed, reduced } => {
                write!(f, "auth hash keccak={hashed} reduced=0x{reduced}")
            }
            DebugEvent::L2Hash { kind, hash } => write!(f, "l2 {kind} hash={hash}"),
            DebugEvent::Signed {
                kind,
                public_key,
                signature_prefix,
            } => write!(f, "{kind} signed pub={public_key} sig={signature_prefix}"),
        }
    }
}

/// 디버그 싱크
///
/// Implementations must not block and must not fail.
pub trait DebugSink: Send + Sync {
    fn record(&self, event: &DebugEvent);
}

/// 아무것도 기록하지 않는 싱크 (기본값)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DebugSink for NoopSink {
    fn record(&self, _event: &DebugEvent) {}
}

/// `tracing` 디버그 이벤트로 기록하는 싱크
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn record(&self, event: &DebugEvent) {
        tracing::debug!(target: "edgex_signer::debug", "{}", event);
    }
}

fn redact(signature: &str) -> String {
    let prefix: String = signature.chars().take(8).collect();
    format!("{prefix}…")
}
