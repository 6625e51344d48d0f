//! Error types for the polling core.

use thiserror::Error;

use certflow_core::error::CodecError;
use certflow_rpc::TransportError;

/// Errors that abort a poll invocation.
///
/// An aborted poll never mutates the cursor; the host retries the same
/// window on the next scheduled invocation.
#[derive(Debug, Error)]
pub enum PollError {
    /// Primary chain node failure (height fetch or log/block decoder).
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Trigger configuration that cannot be interpreted (bad threshold, …).
    #[error("Invalid trigger configuration: {0}")]
    Config(#[from] CodecError),

    /// Cursor could not be loaded or persisted by the host store.
    #[error("Cursor store failure: {0}")]
    Store(String),
}
