//! certflow-ops — the operation catalogue.
//!
//! Stateless request/response handlers over the transport clients, one
//! module per resource. Operations validate their inputs with the core
//! helpers, call the matching client, and normalize the response into typed
//! results; nothing here retains state between calls.

pub mod account;
pub mod certificate;
pub mod contract;
pub mod error;
pub mod explorer;
pub mod identity;

pub use error::OpsError;
