//! HTTP JSON-RPC client for the primary chain node.
//!
//! Retries transient failures with exponential backoff; RPC-level errors
//! returned by the node are surfaced immediately. Request ids come from a
//! counter owned by this client instance, so framing stays independent of
//! anything process-wide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use certflow_core::chain::{Block, BlockTag, LogFilter, RawLog};
use certflow_core::units::{parse_hex_u128, parse_hex_u64};

use crate::error::TransportError;
use crate::policy::{RetryConfig, RetryPolicy};
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// Configuration for [`NodeClient`].
#[derive(Debug, Clone)]
pub struct NodeClientConfig {
    pub retry: RetryConfig,
    pub request_timeout: Duration,
}

impl Default for NodeClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// JSON-RPC client for the chain node.
pub struct NodeClient {
    url: String,
    http: reqwest::Client,
    retry: RetryPolicy,
    request_timeout: Duration,
    next_id: AtomicU64,
}

impl NodeClient {
    pub fn new(url: impl Into<String>, config: NodeClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("failed to build reqwest client");

        Self {
            url: url.into(),
            http,
            retry: RetryPolicy::new(config.retry),
            request_timeout: config.request_timeout,
            next_id: AtomicU64::new(1),
        }
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Self {
        Self::new(url, NodeClientConfig::default())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_once(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let resp = self.http.post(&self.url).json(req).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    ms: self.request_timeout.as_millis() as u64,
                }
            } else {
                TransportError::Http(e.to_string())
            }
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Http(format!("HTTP {status}: {body}")));
        }

        resp.json::<JsonRpcResponse>()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))
    }

    /// Call `method` and deserialize the result, retrying transient failures.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);

        let mut attempt = 0u32;
        let result = loop {
            attempt += 1;
            match self.send_once(&req).await {
                Ok(resp) => break resp.into_result().map_err(TransportError::Rpc)?,
                Err(e) if e.is_retryable() => match self.retry.next_delay(attempt) {
                    Some(delay) => {
                        tracing::warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            method,
                            error = %e,
                            "retrying node request"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(e),
                },
                Err(e) => return Err(e),
            }
        };

        serde_json::from_value(result).map_err(TransportError::Deserialization)
    }

    fn bad_shape(&self, reason: impl Into<String>) -> TransportError {
        TransportError::InvalidResponse {
            service: "node".into(),
            reason: reason.into(),
        }
    }

    // ─── Typed chain methods ──────────────────────────────────────────────────

    /// Current chain height (`eth_blockNumber`).
    pub async fn block_number(&self) -> Result<u64, TransportError> {
        let hex: String = self.call("eth_blockNumber", vec![]).await?;
        parse_hex_u64(&hex).map_err(|e| self.bad_shape(e.to_string()))
    }

    /// Chain id (`eth_chainId`).
    pub async fn chain_id(&self) -> Result<u64, TransportError> {
        let hex: String = self.call("eth_chainId", vec![]).await?;
        parse_hex_u64(&hex).map_err(|e| self.bad_shape(e.to_string()))
    }

    /// Logs matching `filter` (`eth_getLogs`).
    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, TransportError> {
        self.call("eth_getLogs", vec![filter.as_param()]).await
    }

    /// Block by tag, with or without full transaction objects
    /// (`eth_getBlockByNumber`). `None` if the block does not exist.
    pub async fn block_by_number(
        &self,
        tag: BlockTag,
        full_transactions: bool,
    ) -> Result<Option<Block>, TransportError> {
        self.call(
            "eth_getBlockByNumber",
            vec![json!(tag.as_param()), json!(full_transactions)],
        )
        .await
    }

    /// Native balance in wei (`eth_getBalance`).
    pub async fn balance(&self, address: &str, tag: BlockTag) -> Result<u128, TransportError> {
        let hex: String = self
            .call("eth_getBalance", vec![json!(address), json!(tag.as_param())])
            .await?;
        parse_hex_u128(&hex).map_err(|e| self.bad_shape(e.to_string()))
    }

    /// Transaction count / nonce (`eth_getTransactionCount`).
    pub async fn transaction_count(
        &self,
        address: &str,
        tag: BlockTag,
    ) -> Result<u64, TransportError> {
        let hex: String = self
            .call(
                "eth_getTransactionCount",
                vec![json!(address), json!(tag.as_param())],
            )
            .await?;
        parse_hex_u64(&hex).map_err(|e| self.bad_shape(e.to_string()))
    }

    /// Current gas price in wei (`eth_gasPrice`).
    pub async fn gas_price(&self) -> Result<u128, TransportError> {
        let hex: String = self.call("eth_gasPrice", vec![]).await?;
        parse_hex_u128(&hex).map_err(|e| self.bad_shape(e.to_string()))
    }

    /// Read-only contract call (`eth_call`) with pre-encoded calldata.
    pub async fn eth_call(
        &self,
        to: &str,
        data: &str,
        tag: BlockTag,
    ) -> Result<String, TransportError> {
        self.call(
            "eth_call",
            vec![json!({"to": to, "data": data}), json!(tag.as_param())],
        )
        .await
    }

    /// Broadcast a pre-signed transaction (`eth_sendRawTransaction`).
    pub async fn send_raw_transaction(&self, raw: &str) -> Result<String, TransportError> {
        self.call("eth_sendRawTransaction", vec![json!(raw)]).await
    }

    /// Transaction object by hash, `None` when unknown.
    pub async fn transaction_by_hash(&self, hash: &str) -> Result<Option<Value>, TransportError> {
        self.call("eth_getTransactionByHash", vec![json!(hash)]).await
    }

    /// Transaction receipt by hash, `None` while pending.
    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<Value>, TransportError> {
        self.call("eth_getTransactionReceipt", vec![json!(hash)]).await
    }
}
