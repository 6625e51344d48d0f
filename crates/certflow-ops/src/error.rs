use certflow_core::error::CodecError;
use certflow_rpc::TransportError;

/// Failure of one catalogue operation.
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    /// The caller's input failed validation before any request was sent.
    #[error("invalid input: {0}")]
    Input(#[from] CodecError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The resource does not exist on the queried service.
    #[error("not found: {0}")]
    NotFound(String),
}
