//! Error types for the SIP protocol SDK.

use thiserror::Error;

/// Errors surfaced by the SDK's fallible public operations.
///
/// `verify_opening` and `check_stealth_address` never return this type: they
/// collapse every internal failure to `false` because they run over
/// untrusted input during scanning (see the module docs on those functions).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SipError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid curve point: {0}")]
    InvalidPoint(String),

    #[error("decryption failed")]
    DecryptionFailed,

    #[error("secure random number generation failed: {0}")]
    RngFailure(String),

    #[error("generator initialization failed: {0}")]
    GeneratorInitFailure(String),
}

/// Result type alias for SDK operations.
pub type SipResult<T> = Result<T, SipError>;
