//! Per-trigger-kind event decoders.
//!
//! Every decoder has the same contract: given a block window and the filter
//! configuration, return the domain events of its one kind in discovery
//! order. Decoders never mutate the cursor and never fail for "no events" —
//! a failure is always a transport or configuration problem, classified so
//! the orchestrator can decide between aborting the poll (primary node) and
//! degrading to an empty batch (optional indexer).

pub mod assets;
pub mod certificates;
pub mod identity;
pub mod transfers;

use certflow_core::event::DomainEvent;
use certflow_core::filter::FilterConfig;
use certflow_rpc::TransportError;

/// The inputs every decoder sees for one poll window.
#[derive(Debug)]
pub struct DecodeContext<'a> {
    /// Inclusive scan window.
    pub from_block: u64,
    pub to_block: u64,
    /// Read-only filter snapshot for this poll.
    pub config: &'a FilterConfig,
    /// Transfer threshold pre-converted to wei, validated by the
    /// orchestrator before dispatch.
    pub threshold_wei: Option<u128>,
    /// Poll wall-clock time, stamped onto log-based events.
    pub now: i64,
}

/// One decoder's output for a window.
#[derive(Debug, Default)]
pub struct DecodeBatch {
    /// Events in discovery order (log order, or block + tx position).
    pub events: Vec<DomainEvent>,
    /// Blocks whose fetch failed inside a best-effort block scan.
    pub skipped_blocks: u32,
}

impl DecodeBatch {
    pub fn from_events(events: Vec<DomainEvent>) -> Self {
        Self {
            events,
            skipped_blocks: 0,
        }
    }
}

/// Why a decoder could not produce a batch.
#[derive(Debug)]
pub enum DecodeFailure {
    /// The primary chain node failed; the whole poll must abort.
    Primary(TransportError),
    /// An optional secondary source failed; the poll may continue with an
    /// empty batch for this decoder.
    Secondary {
        source: &'static str,
        error: TransportError,
    },
}

impl DecodeFailure {
    pub fn primary(error: TransportError) -> Self {
        Self::Primary(error)
    }
}
