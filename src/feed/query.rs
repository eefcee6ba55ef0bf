use super::{LeadSource, QueryResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Push-style handle over a [`LeadSource`].
///
/// Every `load`/`refresh` executes the query once and delivers the result on the
/// channel returned by [`LeadQuery::new`]. Clones share the source and the channel,
/// so any holder can trigger a re-delivery to the same consumer.
#[derive(Clone)]
pub struct LeadQuery {
    source: Arc<dyn LeadSource>,
    tx: mpsc::UnboundedSender<QueryResult>,
    fetches: Arc<AtomicU64>,
}

impl LeadQuery {
    pub fn new(source: Arc<dyn LeadSource>) -> (Self, mpsc::UnboundedReceiver<QueryResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let query = Self {
            source,
            tx,
            fetches: Arc::new(AtomicU64::new(0)),
        };
        (query, rx)
    }

    /// Initial execution.
    pub async fn load(&self) {
        self.execute("load").await;
    }

    /// Force re-execution and re-delivery through the same channel.
    pub async fn refresh(&self) {
        self.execute("refresh").await;
    }

    /// Number of times the query has been executed.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    async fn execute(&self, reason: &'static str) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let result = self.source.fetch_leads().await;
        match &result {
            Ok(leads) => tracing::debug!(reason, count = leads.len(), "lead query delivered"),
            Err(e) => tracing::warn!(reason, error = %e, "lead query failed"),
        }
        if self.tx.send(result).is_err() {
            tracing::debug!(reason, "lead query result dropped: no subscriber");
        }
    }
}
