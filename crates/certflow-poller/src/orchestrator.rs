//! The poll orchestrator: window computation, decoder dispatch, dedup, and
//! cursor advancement.

use std::sync::Arc;

use certflow_core::cursor::PollCursor;
use certflow_core::event::{DomainEvent, TriggerKind};
use certflow_core::filter::FilterConfig;

use crate::decoders::{self, DecodeBatch, DecodeContext, DecodeFailure};
use crate::error::PollError;
use crate::source::{ChainSource, IndexerSource};

/// The result of one non-aborted poll.
#[derive(Debug)]
pub struct PollOutcome {
    /// Deduplicated events in discovery order; may be empty.
    pub events: Vec<DomainEvent>,
    /// Cursor to persist. Identical to the input cursor for a no-op poll.
    pub cursor: PollCursor,
    /// The scanned `[from, to]` window; `None` when no blocks were scanned.
    pub window: Option<(u64, u64)>,
    /// Blocks lost to individual fetch failures inside a block scan. The
    /// cursor advances past them regardless; this count is the only trace.
    pub skipped_blocks: u32,
    /// Name of a secondary source that failed this cycle, if any.
    pub degraded: Option<&'static str>,
}

impl PollOutcome {
    /// The host-facing emission: `None` for "nothing this cycle".
    pub fn into_batch(self) -> Option<Vec<DomainEvent>> {
        if self.events.is_empty() {
            None
        } else {
            Some(self.events)
        }
    }

    fn no_op(cursor: PollCursor) -> Self {
        Self {
            events: vec![],
            cursor,
            window: None,
            skipped_blocks: 0,
            degraded: None,
        }
    }
}

/// Stateless poll engine; all durable state lives in the [`PollCursor`].
pub struct Poller {
    chain: Arc<dyn ChainSource>,
    indexer: Option<Arc<dyn IndexerSource>>,
}

impl Poller {
    pub fn new(chain: Arc<dyn ChainSource>) -> Self {
        Self {
            chain,
            indexer: None,
        }
    }

    /// Attach the optional secondary indexer source.
    pub fn with_indexer(mut self, indexer: Arc<dyn IndexerSource>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Run one poll for `kind` against the given cursor and filter snapshot.
    ///
    /// Aborts (cursor untouched) only on primary-node failure or unusable
    /// configuration; everything else degrades to fewer events.
    pub async fn poll(
        &self,
        kind: TriggerKind,
        cursor: &PollCursor,
        config: &FilterConfig,
    ) -> Result<PollOutcome, PollError> {
        let height = self.chain.block_number().await?;

        let from_block = if cursor.is_first_poll() {
            height.saturating_sub(config.lookback_blocks)
        } else {
            cursor.last_block_number + 1
        };

        // Expected under frequent polling; not an error.
        if from_block > height {
            tracing::debug!(height, kind = %kind, "no new blocks since last poll");
            return Ok(PollOutcome::no_op(cursor.clone()));
        }

        let ctx = DecodeContext {
            from_block,
            to_block: height,
            config,
            threshold_wei: config.threshold_wei()?,
            now: chrono::Utc::now().timestamp(),
        };

        let (batch, degraded) = match self.dispatch(kind, &ctx).await {
            Ok(batch) => (batch, None),
            Err(DecodeFailure::Primary(error)) => return Err(PollError::Transport(error)),
            Err(DecodeFailure::Secondary { source, error }) => {
                tracing::warn!(
                    source,
                    error = %error,
                    from = from_block,
                    to = height,
                    kind = %kind,
                    "secondary source unavailable, degrading to empty batch"
                );
                (DecodeBatch::default(), Some(source))
            }
        };

        let events: Vec<DomainEvent> = batch
            .events
            .into_iter()
            .filter(|event| !cursor.seen(&event.transaction_hash))
            .collect();

        let mut next_cursor = cursor.clone();
        next_cursor.advance(
            height,
            ctx.now,
            events.iter().map(|e| e.transaction_hash.clone()),
        );

        if batch.skipped_blocks > 0 {
            tracing::warn!(
                skipped = batch.skipped_blocks,
                from = from_block,
                to = height,
                "cursor advanced past blocks lost to fetch failures"
            );
        }
        tracing::info!(
            kind = %kind,
            from = from_block,
            to = height,
            events = events.len(),
            "poll window complete"
        );

        Ok(PollOutcome {
            events,
            cursor: next_cursor,
            window: Some((from_block, height)),
            skipped_blocks: batch.skipped_blocks,
            degraded,
        })
    }

    async fn dispatch(
        &self,
        kind: TriggerKind,
        ctx: &DecodeContext<'_>,
    ) -> Result<DecodeBatch, DecodeFailure> {
        match kind {
            TriggerKind::CertificateIssued => {
                decoders::certificates::issued(self.chain.as_ref(), ctx).await
            }
            TriggerKind::CertificateTransferred => {
                decoders::certificates::transferred(self.chain.as_ref(), ctx).await
            }
            TriggerKind::DidCreated => decoders::identity::created(self.chain.as_ref(), ctx).await,
            TriggerKind::DidUpdated => decoders::identity::updated(self.chain.as_ref(), ctx).await,
            TriggerKind::AssetRegistered => match &self.indexer {
                Some(indexer) => decoders::assets::registered(indexer.as_ref(), ctx).await,
                // No indexer configured behaves like an unreachable one.
                None => Err(DecodeFailure::Secondary {
                    source: decoders::assets::SOURCE_NAME,
                    error: certflow_rpc::TransportError::Other(
                        "no indexer source configured".into(),
                    ),
                }),
            },
            TriggerKind::LargeTransfer => {
                decoders::transfers::large(self.chain.as_ref(), ctx).await
            }
        }
    }
}
