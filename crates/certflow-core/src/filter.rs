//! Per-poll filter configuration supplied by the host runtime.

use serde::{Deserialize, Serialize};

use crate::address::same_address;
use crate::error::CodecError;
use crate::units::{parse_units, NATIVE_DECIMALS};

/// Snapshot of the trigger's parameters for one poll.
///
/// The host binds these from workflow parameters; the orchestrator and
/// decoders treat them as read-only for the duration of the poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Match events whose participant fields equal this address
    /// (case-insensitive). `None` = all participants.
    #[serde(rename = "filterAddress", default)]
    pub filter_address: Option<String>,
    /// Minimum transfer value in native-token units (decimal string),
    /// only meaningful for the large-transfer trigger.
    #[serde(rename = "transferThreshold", default)]
    pub transfer_threshold: Option<String>,
    /// How far behind the head the very first poll starts.
    #[serde(rename = "lookbackBlocks", default = "default_lookback")]
    pub lookback_blocks: u64,
    /// Restrict log queries to one contract address.
    #[serde(rename = "contractAddress", default)]
    pub contract_address: Option<String>,
    /// Network label stamped onto every emitted event.
    #[serde(default = "default_network")]
    pub network: String,
}

fn default_lookback() -> u64 {
    100
}

fn default_network() -> String {
    "mainnet".into()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filter_address: None,
            transfer_threshold: None,
            lookback_blocks: default_lookback(),
            contract_address: None,
            network: default_network(),
        }
    }
}

impl FilterConfig {
    /// Returns `true` when `candidate` passes the address filter.
    /// No filter configured matches everything.
    pub fn matches_address(&self, candidate: &str) -> bool {
        match &self.filter_address {
            Some(filter) => same_address(filter, candidate),
            None => true,
        }
    }

    /// Returns `true` when any of `candidates` passes the address filter.
    pub fn matches_any<'a, I>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        match &self.filter_address {
            Some(filter) => candidates.into_iter().any(|c| same_address(filter, c)),
            None => true,
        }
    }

    /// The transfer threshold converted to wei at the fixed 18-decimal scale.
    /// `None` when no threshold is configured.
    pub fn threshold_wei(&self) -> Result<Option<u128>, CodecError> {
        self.transfer_threshold
            .as_deref()
            .map(|t| parse_units(t, NATIVE_DECIMALS))
            .transpose()
    }
}
