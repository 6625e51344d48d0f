//! certflow-poller — the event-polling and log-interpretation core.
//!
//! # Architecture
//!
//! ```text
//! PollTrigger → Poller
//!                 ├── ChainSource     (node: height, logs, full blocks)
//!                 ├── IndexerSource   (explorer: best-effort log search)
//!                 ├── decoders::*     (one decoder per trigger kind)
//!                 └── PollCursor      (dedup window + block bookmark)
//! ```
//!
//! One poll: fetch the chain height, compute the scan window from the
//! cursor, run the decoder for the requested trigger kind, drop anything
//! already in the dedup window, advance the cursor, emit. A failure against
//! the primary node aborts the poll with the cursor untouched; a failure of
//! the optional indexer degrades to an empty batch.

pub mod decoders;
pub mod error;
pub mod orchestrator;
pub mod source;
pub mod trigger;

pub use decoders::{DecodeBatch, DecodeContext, DecodeFailure};
pub use error::PollError;
pub use orchestrator::{PollOutcome, Poller};
pub use source::{ChainSource, IndexerSource};
pub use trigger::{CursorStore, MemoryCursorStore, PollTrigger};
