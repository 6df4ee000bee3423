use std::sync::Arc;

use searchsync_backend::{BulkAction, BulkActionKind, Document, SearchEngine};
use tracing::{debug, error};

use crate::error::Result;
use crate::stats::RunCounters;

/// One index operation produced by classifying a record.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOperation {
    /// Index (or re-index) a document under the given id.
    Upsert { id: String, document: Document },
    /// Remove the document with the given id.
    Delete { id: String },
}

/// Accumulates operations into bounded batches and reconciles the engine's
/// per-item bulk results against the run counters.
///
/// Accounting is optimistic: counters are incremented while streaming and
/// decremented for every item the engine reports as failed. A transport
/// failure of the bulk call itself propagates to the caller and leaves the
/// counters over-counted for that batch.
pub struct BatchWriter {
    engine: Arc<dyn SearchEngine>,
    index: String,
    batch_size: usize,
}

impl BatchWriter {
    pub fn new(engine: Arc<dyn SearchEngine>, index: impl Into<String>, batch_size: usize) -> Self {
        Self {
            engine,
            index: index.into(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Stream operations for one collection into bulk calls, returning the
    /// counter delta for this submission.
    ///
    /// A flush happens whenever the 0-indexed position of an operation in
    /// the full sequence is divisible by the batch size (which flushes a
    /// single-element batch on the very first item), and once more at the
    /// end for a non-empty buffer. The cadence is observable in bulk-call
    /// counts and kept as-is.
    pub async fn submit<I>(&self, collection: &str, operations: I) -> Result<RunCounters>
    where
        I: IntoIterator<Item = BatchOperation>,
    {
        let mut counters = RunCounters::default();
        let mut buffer: Vec<BulkAction> = Vec::new();

        for (position, operation) in operations.into_iter().enumerate() {
            match operation {
                BatchOperation::Upsert { id, document } => {
                    counters.records_indexed += 1;
                    counters.fields_indexed += document.len();
                    buffer.push(BulkAction::index(collection, id, document));
                }
                BatchOperation::Delete { id } => {
                    counters.records_removed += 1;
                    buffer.push(BulkAction::delete(collection, id));
                }
            }

            if position % self.batch_size == 0 {
                self.flush(&mut buffer, &mut counters).await?;
            }
        }

        if !buffer.is_empty() {
            self.flush(&mut buffer, &mut counters).await?;
        }

        Ok(counters)
    }

    /// Send the buffered operations in one bulk request and correct the
    /// counters for any per-item failures. The buffer is cleared before the
    /// call, whatever the outcome.
    async fn flush(&self, buffer: &mut Vec<BulkAction>, counters: &mut RunCounters) -> Result<()> {
        let actions = std::mem::take(buffer);
        debug!(
            "Flushing {} operations to index '{}'",
            actions.len(),
            self.index
        );

        let response = self.engine.bulk(&self.index, actions).await?;

        if response.errors {
            for item in &response.items {
                let Some(failure) = &item.error else {
                    continue;
                };
                error!("[{}] [{}] {}", item.action, failure.error_type, failure.reason);
                match item.action {
                    BulkActionKind::Index => {
                        counters.records_indexed = counters.records_indexed.saturating_sub(1);
                    }
                    BulkActionKind::Delete => {
                        counters.records_removed = counters.records_removed.saturating_sub(1);
                    }
                }
            }
        }

        Ok(())
    }
}
