//! Error types for the pure codec/validation layer.

use thiserror::Error;

/// Errors from validation and unit/hex conversion.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("Invalid DID: {0}")]
    InvalidDid(String),

    #[error("Invalid hex quantity: {0}")]
    InvalidHex(String),

    #[error("Invalid decimal amount: {0}")]
    InvalidAmount(String),

    #[error("Malformed log record: {0}")]
    MalformedLog(String),
}
