//! certflow-rpc — transport collaborators for the CertFlow toolkit.
//!
//! Three remote services, three clients:
//!
//! ```text
//! NodeClient     → chain node        (JSON-RPC 2.0, primary source)
//! ExplorerClient → block explorer    (REST, optional secondary source)
//! RegistryClient → cert registry     (REST, operation catalogue only)
//! ```
//!
//! The clients are stateless from the caller's point of view apart from a
//! per-instance request-id counter used for JSON-RPC framing.

pub mod error;
pub mod explorer;
pub mod node;
pub mod policy;
pub mod registry;
pub mod request;

pub use error::TransportError;
pub use explorer::ExplorerClient;
pub use node::{NodeClient, NodeClientConfig};
pub use policy::{RetryConfig, RetryPolicy};
pub use registry::RegistryClient;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
