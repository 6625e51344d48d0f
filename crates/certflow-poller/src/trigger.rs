//! Trigger wiring: durable cursor storage plus the load → poll → save cycle
//! a host scheduler drives.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use certflow_core::cursor::PollCursor;
use certflow_core::event::{DomainEvent, TriggerKind};
use certflow_core::filter::FilterConfig;

use crate::error::PollError;
use crate::orchestrator::Poller;

/// Durable cursor storage, keyed per trigger instance.
///
/// Hosts plug in whatever backs their workflow state. Cursors for different
/// trigger instances must not collide, so the key is host-assigned.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// `None` when the key has never been saved; the caller starts a fresh
    /// first-poll cursor in that case.
    async fn load(&self, key: &str) -> Result<Option<PollCursor>, PollError>;

    async fn save(&self, key: &str, cursor: &PollCursor) -> Result<(), PollError>;
}

/// In-memory store for tests and single-process hosts.
#[derive(Default)]
pub struct MemoryCursorStore {
    cursors: Mutex<HashMap<String, PollCursor>>,
}

impl MemoryCursorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CursorStore for MemoryCursorStore {
    async fn load(&self, key: &str) -> Result<Option<PollCursor>, PollError> {
        Ok(self.cursors.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, cursor: &PollCursor) -> Result<(), PollError> {
        self.cursors.lock().await.insert(key.to_string(), cursor.clone());
        Ok(())
    }
}

/// One configured trigger instance: a kind, its filter, and its cursor key.
pub struct PollTrigger {
    kind: TriggerKind,
    config: FilterConfig,
    key: String,
    poller: Arc<Poller>,
    store: Arc<dyn CursorStore>,
}

impl PollTrigger {
    pub fn new(
        kind: TriggerKind,
        config: FilterConfig,
        key: impl Into<String>,
        poller: Arc<Poller>,
        store: Arc<dyn CursorStore>,
    ) -> Self {
        Self {
            kind,
            config,
            key: key.into(),
            poller,
            store,
        }
    }

    pub fn kind(&self) -> TriggerKind {
        self.kind
    }

    /// One scheduler tick: load the cursor, poll, persist, emit.
    ///
    /// Returns `Some(events)` only when the cycle produced new events. The
    /// cursor is saved whenever a window was actually scanned, including
    /// empty windows; a no-op poll leaves storage untouched.
    pub async fn run_once(&self) -> Result<Option<Vec<DomainEvent>>, PollError> {
        let cursor = self
            .store
            .load(&self.key)
            .await?
            .unwrap_or_default();

        let outcome = self.poller.poll(self.kind, &cursor, &self.config).await?;

        if outcome.window.is_some() {
            self.store.save(&self.key, &outcome.cursor).await?;
        }

        Ok(outcome.into_batch())
    }
}
