//! REST client for the block explorer / indexer API.
//!
//! The explorer is an optional secondary data source: it answers richer
//! queries than raw node logs (topic-indexed log search, per-address
//! transaction history) behind an etherscan-style `module`/`action` query
//! interface with a `{status, message, result}` envelope.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use certflow_core::chain::RawLog;
use certflow_core::units::to_hex;

use crate::error::TransportError;

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    result: Value,
}

/// Client for the explorer's REST API.
pub struct ExplorerClient {
    base_url: String,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            http,
            api_key: None,
        }
    }

    /// Attach the explorer API key, when the deployment requires one.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn query(&self, params: &[(&str, String)]) -> Result<Value, TransportError> {
        let mut request = self.http.get(&self.base_url).query(params);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.as_str())]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(TransportError::Http(format!("HTTP {status}")));
        }

        let envelope: Envelope = resp
            .json()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        // The explorer reports "no records" through the error status; that is
        // an empty result, not a failure.
        if envelope.status != "1" {
            if envelope.message.to_ascii_lowercase().contains("no records")
                || envelope.message.to_ascii_lowercase().contains("no transactions")
            {
                return Ok(Value::Array(vec![]));
            }
            return Err(TransportError::Api {
                service: "explorer".into(),
                message: envelope.message,
            });
        }

        Ok(envelope.result)
    }

    /// Topic-indexed log search over `[from_block, to_block]`.
    pub async fn logs_by_topic(
        &self,
        from_block: u64,
        to_block: u64,
        topic0: &str,
        address: Option<&str>,
    ) -> Result<Vec<RawLog>, TransportError> {
        let mut params = vec![
            ("module", "logs".to_string()),
            ("action", "getLogs".to_string()),
            ("fromBlock", to_hex(from_block)),
            ("toBlock", to_hex(to_block)),
            ("topic0", topic0.to_string()),
        ];
        if let Some(addr) = address {
            params.push(("address", addr.to_string()));
        }

        let result = self.query(&params).await?;
        serde_json::from_value(result).map_err(|e| TransportError::InvalidResponse {
            service: "explorer".into(),
            reason: e.to_string(),
        })
    }

    /// Transaction history for an address, ascending by block.
    pub async fn account_transactions(
        &self,
        address: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Value>, TransportError> {
        let params = vec![
            ("module", "account".to_string()),
            ("action", "txlist".to_string()),
            ("address", address.to_string()),
            ("startblock", from_block.to_string()),
            ("endblock", to_block.to_string()),
            ("sort", "asc".to_string()),
        ];
        let result = self.query(&params).await?;
        serde_json::from_value(result).map_err(|e| TransportError::InvalidResponse {
            service: "explorer".into(),
            reason: e.to_string(),
        })
    }

    /// Token transfer history for an address, ascending by block.
    pub async fn token_transfers(
        &self,
        address: &str,
        contract: Option<&str>,
    ) -> Result<Vec<Value>, TransportError> {
        let mut params = vec![
            ("module", "account".to_string()),
            ("action", "tokentx".to_string()),
            ("address", address.to_string()),
            ("sort", "asc".to_string()),
        ];
        if let Some(c) = contract {
            params.push(("contractaddress", c.to_string()));
        }
        let result = self.query(&params).await?;
        serde_json::from_value(result).map_err(|e| TransportError::InvalidResponse {
            service: "explorer".into(),
            reason: e.to_string(),
        })
    }
}
