//! Account and chain-state lookups against the primary node.

use serde::Serialize;

use certflow_core::address::normalize_address;
use certflow_core::chain::BlockTag;
use certflow_core::units::{format_gwei, format_native};
use certflow_rpc::NodeClient;

use crate::error::OpsError;

/// Native balance in both raw and human scales.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub address: String,
    /// Raw balance in wei, decimal string.
    pub wei: String,
    /// Balance at the native 18-decimal scale.
    pub native: String,
}

/// Current gas price in both scales.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPrice {
    pub wei: String,
    pub gwei: String,
}

/// Native balance of an address at the latest block.
pub async fn balance(node: &NodeClient, address: &str) -> Result<AccountBalance, OpsError> {
    let address = normalize_address(address)?;
    let wei = node.balance(&address, BlockTag::Latest).await?;
    Ok(AccountBalance {
        address,
        wei: wei.to_string(),
        native: format_native(wei),
    })
}

/// Confirmed transaction count (the next nonce) of an address.
pub async fn transaction_count(node: &NodeClient, address: &str) -> Result<u64, OpsError> {
    let address = normalize_address(address)?;
    Ok(node.transaction_count(&address, BlockTag::Latest).await?)
}

pub async fn gas_price(node: &NodeClient) -> Result<GasPrice, OpsError> {
    let wei = node.gas_price().await?;
    Ok(GasPrice {
        wei: wei.to_string(),
        gwei: format_gwei(wei),
    })
}

pub async fn height(node: &NodeClient) -> Result<u64, OpsError> {
    Ok(node.block_number().await?)
}

pub async fn chain_id(node: &NodeClient) -> Result<u64, OpsError> {
    Ok(node.chain_id().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_serializes_camel_case() {
        let balance = AccountBalance {
            address: "0xaa00000000000000000000000000000000000001".into(),
            wei: "1500000000000000000".into(),
            native: "1.5".into(),
        };
        let value = serde_json::to_value(&balance).unwrap();
        assert_eq!(value["wei"], "1500000000000000000");
        assert_eq!(value["native"], "1.5");
    }
}
