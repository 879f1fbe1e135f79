//! edgeX Signer Error Hierarchy
//!
//! 서명 메시지 구성 및 서명 과정에서 발생하는 모든 오류

use thiserror::Error;

/// edgeX 서명 오류
///
/// 오류 분류:
/// - Key errors
///   - InvalidKeyType
///   - InvalidKeyValue
/// - Input errors
///   - FieldOverflow
///   - PartialFeeParams
///   - InvalidParameter
///   - JsonError
/// - Signing defects
///   - SignatureLengthError
///   - InvalidSignature
///
/// None of these are transient: every variant indicates malformed input or a
/// library defect, so callers must not send the HTTP request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdgexError {
    // === Key errors ===
    /// Key argument is not textual
    #[error("Invalid key type: {message}")]
    InvalidKeyType { message: String },

    /// Key argument is empty, whitespace-only, or not a hex scalar
    #[error("Invalid key value: {message}")]
    InvalidKeyValue { message: String },

    // === Input errors ===
    /// A packed field does not fit into its bit width
    #[error("Field overflow: {field} must fit in {bits} bits, got {value}")]
    FieldOverflow {
        field: String,
        bits: u32,
        value: String,
    },

    /// Only some of feeTokenId / feeSourceVaultId / feeLimit were supplied
    #[error("Partial fee parameters: only [{present}] supplied, all three fee fields are required")]
    PartialFeeParams { present: String },

    /// Malformed parameter (bad decimal, bad hex, ...)
    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    /// JSON error
    #[error("JSON error: {message}")]
    JsonError { message: String },

    // === Signing defects ===
    /// Serialized signature does not have its mandated length
    #[error("Signature length error: expected {expected} hex chars, got {actual}")]
    SignatureLengthError { expected: usize, actual: usize },

    /// The curve primitive rejected the input
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },
}

impl EdgexError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            EdgexError::InvalidKeyType { .. } => "INVALID_KEY_TYPE",
            EdgexError::InvalidKeyValue { .. } => "INVALID_KEY_VALUE",
            EdgexError::FieldOverflow { .. } => "FIELD_OVERFLOW",
            EdgexError::PartialFeeParams { .. } => "PARTIAL_FEE_PARAMS",
            EdgexError::InvalidParameter { .. } => "INVALID_PARAMETER",
            EdgexError::JsonError { .. } => "JSON_ERROR",
            EdgexError::SignatureLengthError { .. } => "SIGNATURE_LENGTH_ERROR",
            EdgexError::InvalidSignature { .. } => "INVALID_SIGNATURE",
        }
    }

    /// Returns true if the error was caused by the supplied private key
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            EdgexError::InvalidKeyType { .. } | EdgexError::InvalidKeyValue { .. }
        )
    }

    /// Returns true if the error was caused by malformed message parameters
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EdgexError::FieldOverflow { .. }
                | EdgexError::PartialFeeParams { .. }
                | EdgexError::InvalidParameter { .. }
                | EdgexError::JsonError { .. }
        )
    }

    /// Signing is never retried
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Creates an InvalidParameter error
    pub fn invalid_parameter(field: impl Into<String>, message: impl Into<String>) -> Self {
        EdgexError::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for EdgexError {
    fn from(err: serde_json::Error) -> Self {
        EdgexError::JsonError {
            message: err.to_string(),
        }
    }
}

/// Result 타입 alias
pub type EdgexResult<T> = Result<T, EdgexError>;
