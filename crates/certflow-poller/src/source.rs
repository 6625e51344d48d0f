//! Data-source traits consumed by the decoders, plus implementations for the
//! transport clients.

use async_trait::async_trait;

use certflow_core::chain::{Block, BlockTag, LogFilter, RawLog};
use certflow_rpc::{ExplorerClient, NodeClient, TransportError};

/// The primary chain node capability set.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current chain height.
    async fn block_number(&self) -> Result<u64, TransportError>;

    /// Raw logs for a block range and optional contract address.
    async fn logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, TransportError>;

    /// A full block with transaction objects, `None` if it does not exist.
    async fn block_with_transactions(&self, number: u64)
        -> Result<Option<Block>, TransportError>;
}

/// The optional secondary indexer capability set (best-effort).
#[async_trait]
pub trait IndexerSource: Send + Sync {
    /// Topic-indexed log search over `[from_block, to_block]`.
    async fn logs_by_topic(
        &self,
        from_block: u64,
        to_block: u64,
        topic0: &str,
        address: Option<&str>,
    ) -> Result<Vec<RawLog>, TransportError>;
}

#[async_trait]
impl ChainSource for NodeClient {
    async fn block_number(&self) -> Result<u64, TransportError> {
        NodeClient::block_number(self).await
    }

    async fn logs(&self, filter: &LogFilter) -> Result<Vec<RawLog>, TransportError> {
        NodeClient::logs(self, filter).await
    }

    async fn block_with_transactions(
        &self,
        number: u64,
    ) -> Result<Option<Block>, TransportError> {
        self.block_by_number(BlockTag::Number(number), true).await
    }
}

#[async_trait]
impl IndexerSource for ExplorerClient {
    async fn logs_by_topic(
        &self,
        from_block: u64,
        to_block: u64,
        topic0: &str,
        address: Option<&str>,
    ) -> Result<Vec<RawLog>, TransportError> {
        ExplorerClient::logs_by_topic(self, from_block, to_block, topic0, address).await
    }
}
