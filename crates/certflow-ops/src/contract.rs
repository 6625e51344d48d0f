//! Contract reads, transaction broadcast, and transaction lookups.
//!
//! No ABI codec lives here: callers of the generic read operation supply
//! pre-encoded calldata. The one encoded helper is ERC-20 `balanceOf`, whose
//! calldata is a selector plus a single left-padded address.

use serde::Serialize;
use serde_json::Value;

use certflow_core::address::normalize_address;
use certflow_core::chain::BlockTag;
use certflow_core::error::CodecError;
use certflow_core::topics::event_topic;
use certflow_core::units::parse_hex_u128;
use certflow_rpc::NodeClient;

use crate::error::OpsError;

/// Read-only contract call with caller-encoded calldata.
pub async fn read_call(node: &NodeClient, to: &str, data: &str) -> Result<String, OpsError> {
    let to = normalize_address(to)?;
    if !data.starts_with("0x") || !data[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(OpsError::Input(CodecError::InvalidHex(data.to_string())));
    }
    Ok(node.eth_call(&to, data, BlockTag::Latest).await?)
}

/// `balanceOf(address)` calldata for `holder`.
pub fn balance_of_calldata(holder: &str) -> Result<String, CodecError> {
    let holder = normalize_address(holder)?;
    // Function selectors are the first 4 bytes of the signature hash.
    let selector = &event_topic("balanceOf(address)")[..10];
    Ok(format!("{selector}{}{}", "0".repeat(24), &holder[2..]))
}

/// ERC-20 token balance of `holder`, in the token's base units.
pub async fn erc20_balance(
    node: &NodeClient,
    token: &str,
    holder: &str,
) -> Result<u128, OpsError> {
    let token = normalize_address(token)?;
    let data = balance_of_calldata(holder)?;
    let word = node.eth_call(&token, &data, BlockTag::Latest).await?;
    Ok(parse_hex_u128(&word)?)
}

/// Broadcast a pre-signed transaction; returns the transaction hash.
pub async fn send_raw(node: &NodeClient, raw: &str) -> Result<String, OpsError> {
    if !raw.starts_with("0x") || raw.len() <= 2 || !raw[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(OpsError::Input(CodecError::InvalidHex(raw.to_string())));
    }
    Ok(node.send_raw_transaction(raw).await?)
}

/// Normalized execution status from a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TxStatus {
    /// Known to the node but not yet mined.
    Pending,
    Success,
    Failed,
}

/// A transaction paired with its normalized status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub hash: String,
    pub status: TxStatus,
    pub transaction: Value,
    /// Absent while pending.
    pub receipt: Option<Value>,
}

/// Look up a transaction and its receipt, normalizing the receipt status.
pub async fn transaction_report(
    node: &NodeClient,
    hash: &str,
) -> Result<TransactionReport, OpsError> {
    if !certflow_core::address::is_hash(hash) {
        return Err(OpsError::Input(CodecError::InvalidHash(hash.to_string())));
    }

    let transaction = node
        .transaction_by_hash(hash)
        .await?
        .ok_or_else(|| OpsError::NotFound(format!("transaction {hash}")))?;

    let receipt = node.transaction_receipt(hash).await?;
    let status = match &receipt {
        None => TxStatus::Pending,
        Some(receipt) => receipt_status(receipt),
    };

    Ok(TransactionReport {
        hash: hash.to_string(),
        status,
        transaction,
        receipt,
    })
}

fn receipt_status(receipt: &Value) -> TxStatus {
    match receipt.get("status").and_then(Value::as_str) {
        Some("0x1") => TxStatus::Success,
        _ => TxStatus::Failed,
    }
}
