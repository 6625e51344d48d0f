//! DID creation and update decoders (identity-registry contract logs).
//!
//! The identity registry emits `DIDOwnerChanged` both when an identity first
//! appears and when ownership moves. A change where the identity owns itself
//! is a creation; attribute changes are updates.

use certflow_core::address::{address_to_did, data_word, same_address, topic_to_address};
use certflow_core::chain::{LogFilter, RawLog};
use certflow_core::event::{DomainEvent, EventPayload};
use certflow_core::topics;

use crate::decoders::{DecodeBatch, DecodeContext, DecodeFailure};
use crate::source::ChainSource;

fn registry_filter(ctx: &DecodeContext<'_>, topic0: String) -> LogFilter {
    let mut filter = LogFilter::new(ctx.from_block, ctx.to_block).topic0(topic0);
    if let Some(contract) = &ctx.config.contract_address {
        filter = filter.address(contract.clone());
    }
    filter
}

/// `DIDOwnerChanged` logs where the identity is self-owned.
pub async fn created(
    chain: &dyn ChainSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let filter = registry_filter(ctx, topics::did_owner_changed());
    let logs = chain.logs(&filter).await.map_err(DecodeFailure::primary)?;

    let events = logs
        .iter()
        .filter_map(|log| decode_created_log(log, ctx))
        .collect();
    Ok(DecodeBatch::from_events(events))
}

/// One owner-changed log → creation event; `None` for transfers of ownership
/// (identity != owner), malformed logs, or filtered identities.
pub fn decode_created_log(log: &RawLog, ctx: &DecodeContext<'_>) -> Option<DomainEvent> {
    let identity = topic_to_address(log.topics.get(1)?).ok()?;
    let owner = data_word(&log.data, 0)
        .and_then(|word| topic_to_address(&word))
        .ok()?;

    // Self-owned means the identity was just created; anything else is an
    // ownership transfer of an existing DID.
    if !same_address(&identity, &owner) {
        return None;
    }
    if !ctx.config.matches_address(&identity) {
        return None;
    }

    let did = address_to_did(&identity).ok()?;
    Some(DomainEvent {
        payload: EventPayload::DidCreated {
            identity,
            owner,
            did,
        },
        block_number: log.block_number_u64(),
        transaction_hash: log.transaction_hash.clone(),
        network: ctx.config.network.clone(),
        timestamp: ctx.now,
    })
}

/// `DIDAttributeChanged` logs over the window.
pub async fn updated(
    chain: &dyn ChainSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let filter = registry_filter(ctx, topics::did_attribute_changed());
    let logs = chain.logs(&filter).await.map_err(DecodeFailure::primary)?;

    let events = logs
        .iter()
        .filter_map(|log| decode_updated_log(log, ctx))
        .collect();
    Ok(DecodeBatch::from_events(events))
}

/// One attribute-changed log → update event.
pub fn decode_updated_log(log: &RawLog, ctx: &DecodeContext<'_>) -> Option<DomainEvent> {
    let identity = topic_to_address(log.topics.get(1)?).ok()?;
    if !ctx.config.matches_address(&identity) {
        return None;
    }

    let did = address_to_did(&identity).ok()?;
    Some(DomainEvent {
        payload: EventPayload::DidUpdated { identity, did },
        block_number: log.block_number_u64(),
        transaction_hash: log.transaction_hash.clone(),
        network: ctx.config.network.clone(),
        timestamp: ctx.now,
    })
}
