//! Chain wire types: raw logs, blocks, transactions, and log filters.
//!
//! Quantities arrive from the node as `0x`-hex strings and are kept that way
//! in the wire structs; typed accessors do the conversion at the edges.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CodecError;
use crate::units::{parse_hex_u128, parse_hex_u64, to_hex};

// ─── BlockTag ─────────────────────────────────────────────────────────────────

/// A block reference: a concrete number or one of the literal tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Number(u64),
    Latest,
    Earliest,
    Pending,
}

impl BlockTag {
    /// Encoding used as a JSON-RPC parameter: hex for numbers, the literal
    /// tag string otherwise.
    pub fn as_param(&self) -> String {
        match self {
            Self::Number(n) => to_hex(*n),
            Self::Latest => "latest".into(),
            Self::Earliest => "earliest".into(),
            Self::Pending => "pending".into(),
        }
    }
}

impl From<u64> for BlockTag {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

// ─── RawLog ───────────────────────────────────────────────────────────────────

/// A raw log record as delivered by the chain node or indexer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    #[serde(rename = "logIndex")]
    pub log_index: String,
}

impl RawLog {
    pub fn block_number_u64(&self) -> u64 {
        parse_hex_u64(&self.block_number).unwrap_or(0)
    }

    pub fn log_index_u32(&self) -> u32 {
        parse_hex_u64(&self.log_index).unwrap_or(0) as u32
    }

    /// topics[0], the event signature hash.
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }

    /// An indexed parameter topic, with a malformed-log error when absent.
    pub fn topic(&self, index: usize) -> Result<&str, CodecError> {
        self.topics
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| CodecError::MalformedLog(format!("missing topic {index}")))
    }
}

// ─── Transactions and blocks ──────────────────────────────────────────────────

/// A transaction as embedded in a full block response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    /// `None` for contract-creation transactions.
    pub to: Option<String>,
    pub value: String,
}

impl Transaction {
    pub fn value_wei(&self) -> u128 {
        parse_hex_u128(&self.value).unwrap_or(0)
    }
}

/// A block with (optionally) its full transaction objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub number: String,
    pub hash: String,
    pub timestamp: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn number_u64(&self) -> u64 {
        parse_hex_u64(&self.number).unwrap_or(0)
    }

    pub fn timestamp_i64(&self) -> i64 {
        parse_hex_u64(&self.timestamp).unwrap_or(0) as i64
    }
}

// ─── LogFilter ────────────────────────────────────────────────────────────────

/// Filter object for `eth_getLogs`.
///
/// `topics` follows the JSON-RPC convention: position i constrains topics[i],
/// `None` is a wildcard.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub from_block: u64,
    pub to_block: u64,
    pub address: Option<String>,
    pub topics: Vec<Option<String>>,
}

impl LogFilter {
    pub fn new(from_block: u64, to_block: u64) -> Self {
        Self {
            from_block,
            to_block,
            ..Default::default()
        }
    }

    pub fn address(mut self, addr: impl Into<String>) -> Self {
        self.address = Some(addr.into());
        self
    }

    pub fn topic0(mut self, topic: impl Into<String>) -> Self {
        if self.topics.is_empty() {
            self.topics.push(Some(topic.into()));
        } else {
            self.topics[0] = Some(topic.into());
        }
        self
    }

    /// The JSON-RPC filter parameter object.
    pub fn as_param(&self) -> Value {
        let mut obj = json!({
            "fromBlock": to_hex(self.from_block),
            "toBlock": to_hex(self.to_block),
        });
        if let Some(addr) = &self.address {
            obj["address"] = json!(addr);
        }
        if !self.topics.is_empty() {
            obj["topics"] = json!(self.topics);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_tag_params() {
        assert_eq!(BlockTag::Number(400).as_param(), "0x190");
        assert_eq!(BlockTag::Latest.as_param(), "latest");
        assert_eq!(BlockTag::Earliest.as_param(), "earliest");
        assert_eq!(BlockTag::Pending.as_param(), "pending");
    }

    #[test]
    fn raw_log_accessors() {
        let log: RawLog = serde_json::from_value(json!({
            "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
            "data": "0x",
            "blockNumber": "0x12a05f200",
            "transactionHash": "0xabc",
            "logIndex": "0x5"
        }))
        .unwrap();
        assert_eq!(log.block_number_u64(), 5_000_000_000);
        assert_eq!(log.log_index_u32(), 5);
        assert!(log.topic0().unwrap().starts_with("0xddf252ad"));
        assert!(log.topic(1).is_err());
    }

    #[test]
    fn transaction_value() {
        let tx = Transaction {
            hash: "0x1".into(),
            from: "0xaa".into(),
            to: None,
            value: "0xde0b6b3a7640000".into(),
        };
        assert_eq!(tx.value_wei(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn log_filter_param_encoding() {
        let filter = LogFilter::new(0x190, 0x1f4)
            .address("0xcontract")
            .topic0("0xaaaa");
        let param = filter.as_param();
        assert_eq!(param["fromBlock"], "0x190");
        assert_eq!(param["toBlock"], "0x1f4");
        assert_eq!(param["address"], "0xcontract");
        assert_eq!(param["topics"][0], "0xaaaa");
    }

    #[test]
    fn log_filter_omits_empty_fields() {
        let param = LogFilter::new(1, 2).as_param();
        assert!(param.get("address").is_none());
        assert!(param.get("topics").is_none());
    }

    #[test]
    fn block_deserializes_without_transactions() {
        let block: Block = serde_json::from_value(json!({
            "number": "0x10",
            "hash": "0xblock",
            "timestamp": "0x65000000"
        }))
        .unwrap();
        assert_eq!(block.number_u64(), 16);
        assert!(block.transactions.is_empty());
    }
}
