//! Certificate issuance and transfer decoders (primary node logs).

use certflow_core::address::topic_to_address;
use certflow_core::chain::{LogFilter, RawLog};
use certflow_core::event::{DomainEvent, EventPayload};
use certflow_core::{address, topics};

use crate::decoders::{DecodeBatch, DecodeContext, DecodeFailure};
use crate::source::ChainSource;

fn window_filter(ctx: &DecodeContext<'_>, topic0: String) -> LogFilter {
    let mut filter = LogFilter::new(ctx.from_block, ctx.to_block).topic0(topic0);
    if let Some(contract) = &ctx.config.contract_address {
        filter = filter.address(contract.clone());
    }
    filter
}

/// `CertificateIssued` logs over the window.
pub async fn issued(
    chain: &dyn ChainSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let filter = window_filter(ctx, topics::certificate_issued());
    let logs = chain.logs(&filter).await.map_err(DecodeFailure::primary)?;

    let events = logs
        .iter()
        .filter_map(|log| decode_issued_log(log, ctx))
        .collect();
    Ok(DecodeBatch::from_events(events))
}

/// One issuance log → event; `None` when malformed or filtered out.
pub fn decode_issued_log(log: &RawLog, ctx: &DecodeContext<'_>) -> Option<DomainEvent> {
    let certificate_id = log.topics.get(1)?.clone();
    let recipient = topic_to_address(log.topics.get(2)?).ok()?;
    let issuer = address::data_word(&log.data, 0)
        .and_then(|word| topic_to_address(&word))
        .ok()?;

    if !ctx.config.matches_address(&recipient) {
        return None;
    }

    Some(DomainEvent {
        payload: EventPayload::CertificateIssued {
            certificate_id,
            recipient,
            issuer,
        },
        block_number: log.block_number_u64(),
        transaction_hash: log.transaction_hash.clone(),
        network: ctx.config.network.clone(),
        timestamp: ctx.now,
    })
}

/// `CertificateTransferred` logs over the window.
pub async fn transferred(
    chain: &dyn ChainSource,
    ctx: &DecodeContext<'_>,
) -> Result<DecodeBatch, DecodeFailure> {
    let filter = window_filter(ctx, topics::certificate_transferred());
    let logs = chain.logs(&filter).await.map_err(DecodeFailure::primary)?;

    let events = logs
        .iter()
        .filter_map(|log| decode_transferred_log(log, ctx))
        .collect();
    Ok(DecodeBatch::from_events(events))
}

/// One transfer log → event; `None` when malformed or filtered out.
pub fn decode_transferred_log(log: &RawLog, ctx: &DecodeContext<'_>) -> Option<DomainEvent> {
    let certificate_id = log.topics.get(1)?.clone();
    let from = topic_to_address(log.topics.get(2)?).ok()?;
    let to = topic_to_address(log.topics.get(3)?).ok()?;

    // Either side of the transfer may match the configured address.
    if !ctx.config.matches_any([from.as_str(), to.as_str()]) {
        return None;
    }

    Some(DomainEvent {
        payload: EventPayload::CertificateTransferred {
            certificate_id,
            from,
            to,
        },
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

    const RECIPIENT: &str = "0xbb00000000000000000000000000000000000001";
    const ISSUER: &str = "0xaa00000000000000000000000000000000000002";

    fn pad_address(addr: &str) -> String {
        format!("0x{}{}", "0".repeat(24), &addr[2..])
    }

    fn issued_log() -> RawLog {
        RawLog {
            address: "0xcccccccccccccccccccccccccccccccccccccccc".into(),
            topics: vec![
                topics::certificate_issued(),
                format!("0x{}", "11".repeat(32)),
                pad_address(RECIPIENT),
            ],
            data: pad_address(ISSUER),
            block_number: "0x1a4".into(),
            transaction_hash: "0xf00d".into(),
            log_index: "0x0".into(),
        }
    }

    fn transferred_log() -> RawLog {
        RawLog {
            address: "0xcccccccccccccccccccccccccccccccccccccccc".into(),
            topics: vec![
                topics::certificate_transferred(),
                format!("0x{}", "11".repeat(32)),
                pad_address(ISSUER),
                pad_address(RECIPIENT),
            ],
            data: "0x".into(),
            block_number: "0x1a4".into(),
            transaction_hash: "0xbeef".into(),
            log_index: "0x1".into(),
        }
    }

    fn ctx(config: &FilterConfig) -> DecodeContext<'_> {
        DecodeContext {
            from_block: 400,
            to_block: 450,
            config,
            threshold_wei: None,
            now: 1_700_000_000,
        }
    }

    #[test]
    fn issued_log_decodes() {
        let config = FilterConfig::default();
        let event = decode_issued_log(&issued_log(), &ctx(&config)).unwrap();
        match &event.payload {
            EventPayload::CertificateIssued {
                certificate_id,
                recipient,
                issuer,
            } => {
                assert_eq!(certificate_id, &format!("0x{}", "11".repeat(32)));
                assert_eq!(recipient, RECIPIENT);
                assert_eq!(issuer, ISSUER);
            }
            other => panic!("wrong payload: {other:?}"),
        }
        assert_eq!(event.block_number, 420);
        assert_eq!(event.transaction_hash, "0xf00d");
    }

    #[test]
    fn issued_respects_recipient_filter() {
        let matching = FilterConfig {
            filter_address: Some(RECIPIENT.to_ascii_uppercase().replace("0X", "0x")),
            ..Default::default()
        };
        assert!(decode_issued_log(&issued_log(), &ctx(&matching)).is_some());

        let other = FilterConfig {
            filter_address: Some("0xcc00000000000000000000000000000000000003".into()),
            ..Default::default()
        };
        assert!(decode_issued_log(&issued_log(), &ctx(&other)).is_none());
    }

    #[test]
    fn transferred_matches_either_side() {
        // `to` side, different casing
        let to_side = FilterConfig {
            filter_address: Some(RECIPIENT.to_ascii_uppercase().replace("0X", "0x")),
            ..Default::default()
        };
        assert!(decode_transferred_log(&transferred_log(), &ctx(&to_side)).is_some());

        // `from` side
        let from_side = FilterConfig {
            filter_address: Some(ISSUER.into()),
            ..Default::default()
        };
        assert!(decode_transferred_log(&transferred_log(), &ctx(&from_side)).is_some());

        // Neither side
        let neither = FilterConfig {
            filter_address: Some("0xcc00000000000000000000000000000000000003".into()),
            ..Default::default()
        };
        assert!(decode_transferred_log(&transferred_log(), &ctx(&neither)).is_none());
    }

    #[test]
    fn malformed_log_is_dropped_not_fatal() {
        let mut log = issued_log();
        log.topics.truncate(2); // recipient topic missing
        let config = FilterConfig::default();
        assert!(decode_issued_log(&log, &ctx(&config)).is_none());
    }
}
