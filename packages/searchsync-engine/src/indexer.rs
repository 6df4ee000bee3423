use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::batch::{BatchOperation, BatchWriter};
use crate::checkpoint::CheckpointStore;
use crate::document::Documentifier;
use crate::error::Result;
use crate::provider::RecordProvider;
use crate::record::{Record, TimeFilter};
use crate::stats::RunCounters;

/// Indexes one collection per call: decides full vs. differential for the
/// collection, fetches the candidate record set, classifies records into
/// upserts and deletes, drives the batch writer and finally advances the
/// collection checkpoint.
pub struct CollectionIndexer {
    provider: Arc<dyn RecordProvider>,
    documentifier: Arc<dyn Documentifier>,
    checkpoints: Arc<CheckpointStore>,
    writer: BatchWriter,
}

impl CollectionIndexer {
    pub fn new(
        provider: Arc<dyn RecordProvider>,
        documentifier: Arc<dyn Documentifier>,
        checkpoints: Arc<CheckpointStore>,
        writer: BatchWriter,
    ) -> Self {
        Self {
            provider,
            documentifier,
            checkpoints,
            writer,
        }
    }

    /// Index one collection, returning the counter delta it contributed.
    ///
    /// Differential indexing is attempted only when the run is globally
    /// differential AND this collection has a readable checkpoint; a
    /// missing checkpoint silently downgrades this collection to a full
    /// pass without affecting the rest of the run. A provider failure
    /// skips the collection (no checkpoint update, no module count);
    /// engine failures propagate to the caller's isolation boundary.
    pub async fn index_collection(
        &self,
        collection: &str,
        run_differential: bool,
    ) -> Result<RunCounters> {
        let mut differential = run_differential;
        let mut filter = None;
        let mut include_deleted = false;

        if differential {
            match self.checkpoints.read_collection(collection).await {
                Ok(checkpoint) => {
                    filter = Some(TimeFilter::since(checkpoint));
                    include_deleted = true;
                }
                Err(_) => {
                    info!(
                        "Time metadata not found for {collection}, performing a full index for this collection"
                    );
                    differential = false;
                }
            }
        }

        // Captured before the fetch so the checkpoint can never advance
        // past records that existed when the fetch started.
        let candidate_checkpoint = Utc::now();

        let records = match self
            .provider
            .fetch(collection, filter, include_deleted)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to index collection {collection}: {e}");
                return Ok(RunCounters::default());
            }
        };

        let Some(records) = records else {
            if !differential {
                info!("Skipping {collection}: provider returned no rows, the table is probably empty");
            }
            return Ok(RunCounters::default());
        };

        info!("Indexing collection {collection}...");

        let fetched = records.len();
        let documentifier = self.documentifier.as_ref();
        let operations = records
            .into_iter()
            .map(|record| classify(documentifier, record));

        let mut counters = self.writer.submit(collection, operations).await?;

        let total = fetched.saturating_sub(counters.records_removed);
        if counters.records_indexed == total {
            info!("Indexed {}/{} {collection}", counters.records_indexed, total);
        } else {
            warn!("Indexed {}/{} {collection}", counters.records_indexed, total);
        }

        self.checkpoints
            .write_collection(collection, candidate_checkpoint)
            .await?;
        counters.modules_indexed += 1;

        Ok(counters)
    }
}

/// A soft-deleted record propagates as a deletion; everything else is an
/// upsert carrying the documentified body.
fn classify(documentifier: &dyn Documentifier, record: Record) -> BatchOperation {
    if record.deleted {
        BatchOperation::Delete { id: record.id }
    } else {
        let document = documentifier.documentify(&record);
        BatchOperation::Upsert {
            id: record.id,
            document,
        }
    }
}
