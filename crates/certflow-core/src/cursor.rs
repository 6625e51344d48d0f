//! Poll cursor — the durable bookmark for one trigger instance.
//!
//! The cursor records polling progress and a trailing window of recently
//! emitted transaction hashes for deduplication. It is owned exclusively by
//! one trigger instance, persisted opaquely by the host, and mutated only by
//! the poll orchestrator after a window has been fully computed.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Upper bound on the dedup window.
///
/// This is a bounded-memory trade-off, not a correctness guarantee: should
/// more than this many qualifying events land in a single window, the oldest
/// hashes are evicted and could re-emit on a hypothetical re-poll of an
/// already-advanced range.
pub const MAX_TRACKED_HASHES: usize = 1000;

/// Durable polling state: last processed block, last poll time, and the
/// most-recent-1000 emitted transaction hashes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollCursor {
    /// Last block height covered by a successful poll. `0` = never polled.
    #[serde(rename = "lastBlockNumber")]
    pub last_block_number: u64,
    /// Unix timestamp of the last successful poll.
    #[serde(rename = "lastTimestamp")]
    pub last_timestamp: i64,
    /// Trailing FIFO of emitted transaction hashes, oldest first.
    #[serde(rename = "processedTxHashes")]
    pub processed_tx_hashes: VecDeque<String>,
}

impl PollCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` until the first successful poll advances the cursor.
    pub fn is_first_poll(&self) -> bool {
        self.last_block_number == 0
    }

    /// Returns `true` if `tx_hash` was emitted within the dedup window.
    ///
    /// Comparison is case-insensitive: hashes are hex and different sources
    /// disagree on casing.
    pub fn seen(&self, tx_hash: &str) -> bool {
        self.processed_tx_hashes
            .iter()
            .any(|h| h.eq_ignore_ascii_case(tx_hash))
    }

    /// Advance the cursor to `height` after a fully computed window.
    ///
    /// `emitted` is appended in emission order; the combined set is then
    /// truncated from the front so only the newest [`MAX_TRACKED_HASHES`]
    /// remain.
    pub fn advance<I>(&mut self, height: u64, now: i64, emitted: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.last_block_number = height;
        self.last_timestamp = now;
        self.processed_tx_hashes.extend(emitted);
        while self.processed_tx_hashes.len() > MAX_TRACKED_HASHES {
            self.processed_tx_hashes.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cursor_is_first_poll() {
        let cursor = PollCursor::new();
        assert!(cursor.is_first_poll());
        assert_eq!(cursor.last_block_number, 0);
        assert!(cursor.processed_tx_hashes.is_empty());
    }

    #[test]
    fn advance_records_progress() {
        let mut cursor = PollCursor::new();
        cursor.advance(500, 1_700_000_000, vec!["0xaa".into(), "0xbb".into()]);
        assert!(!cursor.is_first_poll());
        assert_eq!(cursor.last_block_number, 500);
        assert_eq!(cursor.last_timestamp, 1_700_000_000);
        assert!(cursor.seen("0xaa"));
        assert!(cursor.seen("0xBB")); // case-insensitive
        assert!(!cursor.seen("0xcc"));
    }

    #[test]
    fn dedup_window_is_bounded_fifo() {
        let mut cursor = PollCursor::new();
        let hashes: Vec<String> = (0..1200).map(|i| format!("0x{i:04x}")).collect();
        cursor.advance(10, 0, hashes);

        assert_eq!(cursor.processed_tx_hashes.len(), MAX_TRACKED_HASHES);
        // Oldest 200 evicted, newest retained
        assert!(!cursor.seen("0x0000"));
        assert!(!cursor.seen("0x00c7")); // 199
        assert!(cursor.seen("0x00c8")); // 200
        assert!(cursor.seen("0x04af")); // 1199, the newest
    }

    #[test]
    fn serde_wire_names() {
        let mut cursor = PollCursor::new();
        cursor.advance(42, 7, vec!["0xaa".into()]);
        let value = serde_json::to_value(&cursor).unwrap();
        assert_eq!(value["lastBlockNumber"], 42);
        assert_eq!(value["lastTimestamp"], 7);
        assert_eq!(value["processedTxHashes"][0], "0xaa");

        let back: PollCursor = serde_json::from_value(value).unwrap();
        assert_eq!(back.last_block_number, 42);
        assert!(back.seen("0xaa"));
    }
}
