//! certflow-core — data model and pure helpers for the CertFlow toolkit.
//!
//! # Architecture
//!
//! ```text
//! FilterConfig ─┐
//! PollCursor  ──┼─→ consumed by certflow-poller (orchestrator + decoders)
//! RawLog      ──┤
//! DomainEvent ←─┘   emitted back to the host as flat key-value records
//! ```
//!
//! Everything in this crate is stateless and side-effect free: wire types,
//! the durable poll cursor, event-topic hashing, and unit conversion.

pub mod address;
pub mod chain;
pub mod cursor;
pub mod error;
pub mod event;
pub mod filter;
pub mod topics;
pub mod units;

pub use chain::{Block, BlockTag, LogFilter, RawLog, Transaction};
pub use cursor::{PollCursor, MAX_TRACKED_HASHES};
pub use error::CodecError;
pub use event::{DomainEvent, EventPayload, TriggerKind};
pub use filter::FilterConfig;
