//! Domain events — the normalized, typed output of the polling core.
//!
//! A [`DomainEvent`] is created by exactly one decoder from one raw log (or
//! one transaction, for large transfers), never mutated afterwards, and
//! serialized for the host as a flat key-value record tagged `eventType`.

use serde::{Deserialize, Serialize};

/// The six pollable trigger kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerKind {
    CertificateIssued,
    CertificateTransferred,
    DidCreated,
    DidUpdated,
    AssetRegistered,
    LargeTransfer,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 6] = [
        Self::CertificateIssued,
        Self::CertificateTransferred,
        Self::DidCreated,
        Self::DidUpdated,
        Self::AssetRegistered,
        Self::LargeTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CertificateIssued => "certificateIssued",
            Self::CertificateTransferred => "certificateTransferred",
            Self::DidCreated => "didCreated",
            Self::DidUpdated => "didUpdated",
            Self::AssetRegistered => "assetRegistered",
            Self::LargeTransfer => "largeTransfer",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriggerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown trigger kind: {s}"))
    }
}

/// Kind-specific event fields, one variant per trigger kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EventPayload {
    CertificateIssued {
        certificate_id: String,
        recipient: String,
        issuer: String,
    },
    CertificateTransferred {
        certificate_id: String,
        from: String,
        to: String,
    },
    DidCreated {
        identity: String,
        owner: String,
        did: String,
    },
    DidUpdated {
        identity: String,
        did: String,
    },
    AssetRegistered {
        asset_id: String,
        owner: String,
    },
    LargeTransfer {
        from: String,
        /// `None` for contract-creation transactions.
        to: Option<String>,
        /// Native-token units, decimal string.
        value: String,
        /// Base units (wei), decimal string.
        value_wei: String,
    },
}

impl EventPayload {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::CertificateIssued { .. } => TriggerKind::CertificateIssued,
            Self::CertificateTransferred { .. } => TriggerKind::CertificateTransferred,
            Self::DidCreated { .. } => TriggerKind::DidCreated,
            Self::DidUpdated { .. } => TriggerKind::DidUpdated,
            Self::AssetRegistered { .. } => TriggerKind::AssetRegistered,
            Self::LargeTransfer { .. } => TriggerKind::LargeTransfer,
        }
    }
}

/// One on-chain occurrence of interest, normalized for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    #[serde(flatten)]
    pub payload: EventPayload,
    #[serde(rename = "blockNumber")]
    pub block_number: u64,
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    pub network: String,
    pub timestamp: i64,
}

impl DomainEvent {
    pub fn kind(&self) -> TriggerKind {
        self.payload.kind()
    }
}
