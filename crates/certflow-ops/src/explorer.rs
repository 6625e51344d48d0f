//! Address history operations over the explorer API.
//!
//! Explorer list endpoints return decimal-string fields inside loose JSON
//! objects; these operations normalize them into typed records and drop
//! entries too malformed to represent.

use serde::Serialize;
use serde_json::Value;

use certflow_core::address::normalize_address;
use certflow_core::units::format_native;
use certflow_rpc::ExplorerClient;

use crate::error::OpsError;

/// One historical transaction of an address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressTransaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    pub block_number: u64,
    pub timestamp: i64,
    /// Value in wei, decimal string.
    pub value_wei: String,
    /// Value at the native 18-decimal scale.
    pub value: String,
}

/// One historical token transfer touching an address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    pub block_number: u64,
    pub contract: String,
    pub token_symbol: Option<String>,
    /// Raw value in the token's own base units.
    pub value: String,
}

fn str_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

fn decimal_u64(entry: &Value, key: &str) -> Option<u64> {
    entry.get(key)?.as_str()?.parse().ok()
}

/// One raw explorer entry → typed record; `None` when malformed.
fn normalize_transaction(entry: &Value) -> Option<AddressTransaction> {
    let value_wei = str_field(entry, "value")?;
    let value = value_wei
        .parse::<u128>()
        .map(format_native)
        .unwrap_or_else(|_| value_wei.clone());

    Some(AddressTransaction {
        hash: str_field(entry, "hash")?,
        from: str_field(entry, "from")?,
        to: str_field(entry, "to").filter(|t| !t.is_empty()),
        block_number: decimal_u64(entry, "blockNumber")?,
        timestamp: decimal_u64(entry, "timeStamp")? as i64,
        value_wei,
        value,
    })
}

fn normalize_token_transfer(entry: &Value) -> Option<TokenTransfer> {
    Some(TokenTransfer {
        hash: str_field(entry, "hash")?,
        from: str_field(entry, "from")?,
        to: str_field(entry, "to").filter(|t| !t.is_empty()),
        block_number: decimal_u64(entry, "blockNumber")?,
        contract: str_field(entry, "contractAddress")?,
        token_symbol: str_field(entry, "tokenSymbol"),
        value: str_field(entry, "value")?,
    })
}

/// Transaction history of an address over a block range, ascending.
pub async fn transactions(
    explorer: &ExplorerClient,
    address: &str,
    from_block: u64,
    to_block: u64,
) -> Result<Vec<AddressTransaction>, OpsError> {
    let address = normalize_address(address)?;
    let entries = explorer
        .account_transactions(&address, from_block, to_block)
        .await?;

    let records: Vec<AddressTransaction> =
        entries.iter().filter_map(normalize_transaction).collect();
    if records.len() < entries.len() {
        tracing::debug!(
            dropped = entries.len() - records.len(),
            address,
            "dropped malformed explorer transaction entries"
        );
    }
    Ok(records)
}

/// Token transfer history of an address, optionally for one token contract.
pub async fn token_transfers(
    explorer: &ExplorerClient,
    address: &str,
    contract: Option<&str>,
) -> Result<Vec<TokenTransfer>, OpsError> {
    let address = normalize_address(address)?;
    let contract = contract.map(normalize_address).transpose()?;
    let entries = explorer
        .token_transfers(&address, contract.as_deref())
        .await?;
    Ok(entries.iter().filter_map(normalize_token_transfer).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> Value {
        json!({
            "hash": "0xabc",
            "from": "0xaa00000000000000000000000000000000000001",
            "to": "0xbb00000000000000000000000000000000000002",
            "blockNumber": "18000000",
            "timeStamp": "1700000000",
            "value": "2500000000000000000"
        })
    }

    #[test]
    fn transaction_normalizes_decimal_fields() {
        let tx = normalize_transaction(&entry()).unwrap();
        assert_eq!(tx.block_number, 18_000_000);
        assert_eq!(tx.timestamp, 1_700_000_000);
        assert_eq!(tx.value_wei, "2500000000000000000");
        assert_eq!(tx.value, "2.5");
    }

    #[test]
    fn contract_creation_has_no_recipient() {
        let mut raw = entry();
        raw["to"] = json!("");
        let tx = normalize_transaction(&raw).unwrap();
        assert!(tx.to.is_none());
    }

    #[test]
    fn malformed_entry_is_dropped() {
        let mut raw = entry();
        raw.as_object_mut().unwrap().remove("hash");
        assert!(normalize_transaction(&raw).is_none());
    }

    #[test]
    fn token_transfer_normalizes() {
        let raw = json!({
            "hash": "0xdef",
            "from": "0xaa00000000000000000000000000000000000001",
            "to": "0xbb00000000000000000000000000000000000002",
            "blockNumber": "18000001",
            "contractAddress": "0xcc00000000000000000000000000000000000003",
            "tokenSymbol": "CERT",
            "value": "1000"
        });
        let transfer = normalize_token_transfer(&raw).unwrap();
        assert_eq!(transfer.token_symbol.as_deref(), Some("CERT"));
        assert_eq!(transfer.value, "1000");
    }
}
