//! Asset registration decoder (best-effort, secondary indexer source).
//!
//! Asset registrations are only queryable through the explorer's
//! topic-indexed log search. The explorer is optional infrastructure, so any
//! failure here is reported as a secondary-source failure for the
//! orchestrator to degrade rather than abort on.

use certflow_core::address::topic_to_address;
use certflow_core::chain::RawLog;
use certflow_core::event::{DomainEvent, EventPayload};
use certflow_core::topics;

use crate::decoders::{DecodeBatch, DecodeContext, DecodeFailure};
use crate::source::IndexerSource;

pub const SOURCE_NAME: &str = "indexer";

/// `AssetRegistered` logs over the window, via the indexer.
pub async fn registered(
    indexer: &dyn IndexerSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let logs = indexer
        .logs_by_topic(
            ctx.from_block,
            ctx.to_block,
            &topics::asset_registered(),
            ctx.config.contract_address.as_deref(),
        )
        .await
        .map_err(|error| DecodeFailure::Secondary {
            source: SOURCE_NAME,
            error,
        })?;

    let events = logs
        .iter()
        .filter_map(|log| decode_registered_log(log, ctx))
        .collect();
    Ok(DecodeBatch::from_events(events))
}

/// One registration log → event; `None` when malformed or filtered out.
pub fn decode_registered_log(log: &RawLog, ctx: &DecodeContext<'_>) -> Option<DomainEvent> {
    let owner = topic_to_address(log.topics.get(1)?).ok()?;
    let asset_id = log.topics.get(2)?.clone();

    if !ctx.config.matches_address(&owner) {
        return None;
    }

    Some(DomainEvent {
        payload: EventPayload::AssetRegistered { asset_id, owner },
        block_number: log.block_number_u64(),
        transaction_hash: log.transaction_hash.clone(),
        network: ctx.config.network.clone(),
        timestamp: ctx.now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use certflow_core::filter::FilterConfig;

    const OWNER: &str = "0xab00000000000000000000000000000000000006";

    fn registered_log() -> RawLog {
        RawLog {
            address: "0xa100000000000000000000000000000000000007".into(),
            topics: vec![
                topics::asset_registered(),
                format!("0x{}{}", "0".repeat(24), &OWNER[2..]),
                format!("0x{}", "22".repeat(32)),
            ],
            data: "0x".into(),
            block_number: "0x300".into(),
            transaction_hash: "0xa55e7".into(),
            log_index: "0x0".into(),
        }
    }

    fn ctx(config: &FilterConfig) -> DecodeContext<'_> {
        DecodeContext {
            from_block: 760,
            to_block: 770,
            config,
            threshold_wei: None,
            now: 1_700_000_000,
        }
    }

    #[test]
    fn registration_decodes_with_owner_filter() {
        let config = FilterConfig {
            filter_address: Some(OWNER.into()),
            ..Default::default()
        };
        let event = decode_registered_log(&registered_log(), &ctx(&config)).unwrap();
        match &event.payload {
            EventPayload::AssetRegistered { asset_id, owner } => {
                assert_eq!(owner, OWNER);
                assert_eq!(asset_id, &format!("0x{}", "22".repeat(32)));
            }
            other => panic!("wrong payload: {other:?}"),
        }
    }

    #[test]
    fn foreign_owner_is_filtered() {
        let config = FilterConfig {
            filter_address: Some("0xcd00000000000000000000000000000000000008".into()),
            ..Default::default()
        };
        assert!(decode_registered_log(&registered_log(), &ctx(&config)).is_none());
    }
}
