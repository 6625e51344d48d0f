//! Large native-token transfer decoder (full block scan).
//!
//! There is no log for plain value transfers, so this decoder walks every
//! block in the window with full transaction objects. Blocks are fetched in
//! fixed-size batches to bound per-poll request latency; a single block's
//! fetch failure is counted and skipped, never fatal to the batch.

use certflow_core::chain::{Block, Transaction};
use certflow_core::event::{DomainEvent, EventPayload};
use certflow_core::units::format_native;

use crate::decoders::{DecodeBatch, DecodeContext, DecodeFailure};
use crate::source::ChainSource;

/// Blocks fetched per batch.
pub const BLOCK_BATCH_SIZE: u64 = 10;

/// Scan `[from_block, to_block]` for transfers at or above the threshold.
pub async fn large(
    chain: &dyn ChainSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let threshold = ctx.threshold_wei.unwrap_or(0);
    let mut batch = DecodeBatch::default();

    let mut start = ctx.from_block;
    while start <= ctx.to_block {
        let end = (start + BLOCK_BATCH_SIZE - 1).min(ctx.to_block);
        for number in start..=end {
            match chain.block_with_transactions(number).await {
                Ok(Some(block)) => collect_block(&block, threshold, ctx, &mut batch.events),
                Ok(None) => {
                    // The node reported a height it cannot serve yet.
                    tracing::debug!(block = number, "block not available, skipping");
                    batch.skipped_blocks += 1;
                }
                Err(error) => {
                    tracing::warn!(block = number, error = %error, "block fetch failed, skipping");
                    batch.skipped_blocks += 1;
                }
            }
        }
        start = end + 1;
    }

    Ok(batch)
}

fn collect_block(
    block: &Block,
    threshold: u128,
    ctx: &DecodeContext<'_>,
    out: &mut Vec<DomainEvent>,
) {
    for tx in &block.transactions {
        if let Some(event) = decode_transaction(tx, block, threshold, ctx) {
            out.push(event);
        }
    }
}

/// One transaction → event when it clears the threshold and address filter.
///
/// Without a configured threshold every value-carrying transaction
/// qualifies; zero-value calls never do.
pub fn decode_transaction(
    tx: &Transaction,
    block: &Block,
    threshold: u128,
    ctx: &DecodeContext<'_>,
) -> Option<DomainEvent> {
    let value = tx.value_wei();
    if value == 0 || value < threshold {
        return None;
    }

    let mut participants = vec![tx.from.as_str()];
    if let Some(to) = &tx.to {
        participants.push(to.as_str());
    }
    if !ctx.config.matches_any(participants) {
        return None;
    }

    Some(DomainEvent {
        payload: EventPayload::LargeTransfer {
            from: tx.from.clone(),
            to: tx.to.clone(),
            value: format_native(value),
            value_wei: value.to_string(),
        },
        block_number: block.number_u64(),
        transaction_hash: tx.hash.clone(),
        network: ctx.config.network.clone(),
        timestamp: block.timestamp_i64(),
    })
}
