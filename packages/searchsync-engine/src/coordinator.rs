use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use searchsync_backend::{default_mapping_body, BulkAction, SearchEngine};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::batch::BatchWriter;
use crate::checkpoint::CheckpointStore;
use crate::config::IndexerConfig;
use crate::document::Documentifier;
use crate::error::{IndexerError, Result};
use crate::indexer::CollectionIndexer;
use crate::provider::RecordProvider;
use crate::record::Record;
use crate::stats::{RunCounters, Summary};

/// Orchestrates one indexing run across all configured collections.
///
/// Decides full vs. differential at the global level, manages the index
/// lifecycle (a full run drops and recreates the index, a differential run
/// never does), invokes the collection indexer with per-collection failure
/// isolation, and stamps the global checkpoint when the run finishes.
pub struct RunCoordinator {
    config: IndexerConfig,
    engine: Arc<dyn SearchEngine>,
    documentifier: Arc<dyn Documentifier>,
    checkpoints: Arc<CheckpointStore>,
    indexer: CollectionIndexer,
}

impl RunCoordinator {
    pub fn new(
        config: IndexerConfig,
        engine: Arc<dyn SearchEngine>,
        provider: Arc<dyn RecordProvider>,
        documentifier: Arc<dyn Documentifier>,
    ) -> Self {
        let checkpoints = Arc::new(CheckpointStore::new(
            config.lock_file.clone(),
            config.index.clone(),
            engine.clone(),
        ));
        let writer = BatchWriter::new(engine.clone(), config.index.clone(), config.batch_size);
        let indexer = CollectionIndexer::new(
            provider,
            documentifier.clone(),
            checkpoints.clone(),
            writer,
        );

        Self {
            config,
            engine,
            documentifier,
            checkpoints,
            indexer,
        }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Run one indexing pass over the given collections.
    ///
    /// Only administrative engine failures (dropping/recreating the index)
    /// abort the run; everything below collection granularity is isolated
    /// and reported through logs and the returned [`Summary`].
    pub async fn run(&self, collections: &[String]) -> Result<Summary> {
        if !self.config.enabled {
            return Err(IndexerError::config("indexing is disabled"));
        }

        let run_id = Uuid::new_v4();
        let started = Instant::now();

        info!("Run {run_id}: starting indexing procedures");
        info!(
            "Run {run_id}: indexing is performed using {}",
            self.documentifier.name()
        );

        let last_run = if self.config.differential {
            self.checkpoints.read_global()
        } else {
            None
        };

        // Differential only when enabled AND a previous run left a marker.
        let differential = last_run.is_some();
        if differential {
            info!("Run {run_id}: a differential indexing will be performed");
        } else {
            info!("Run {run_id}: a full indexing will be performed");
            self.engine.delete_index(&self.config.index).await?;
            info!("Removed index '{}'", self.config.index);
            self.engine
                .create_index(&self.config.index, default_mapping_body())
                .await?;
            info!("Created new index '{}'", self.config.index);
        }

        let mut counters = RunCounters::default();

        for collection in collections {
            match self.indexer.index_collection(collection, differential).await {
                Ok(delta) => counters.merge(&delta),
                Err(e) => {
                    error!("Failed to index collection {collection}: {e}");
                }
            }
        }

        let elapsed = started.elapsed();

        if self.config.differential {
            // Stamped with the end of the run: records modified during the
            // run's own window fall to the next differential pass.
            if let Err(e) = self.checkpoints.write_global(Utc::now()) {
                warn!("Failed to write lock file: {e}");
            }
        }

        let summary = Summary::new(run_id, counters, elapsed);
        for line in summary.report_lines() {
            info!("{line}");
        }
        info!("Run {run_id}: done");

        Ok(summary)
    }

    /// Liveness probe against the engine, returning the round-trip time.
    pub async fn ping(&self) -> Option<Duration> {
        let started = Instant::now();
        match self.engine.ping().await {
            Ok(true) => {
                let elapsed = started.elapsed();
                info!("Ping performed in {} µs", elapsed.as_micros());
                Some(elapsed)
            }
            Ok(false) => {
                error!("Failed to ping server");
                None
            }
            Err(e) => {
                error!("Failed to ping server: {e}");
                None
            }
        }
    }

    /// Remove every index the engine holds, effectively nuking all data.
    pub async fn remove_all_indices(&self) -> Result<()> {
        info!("Deleting all indices");
        self.engine.delete_all_indices().await?;
        Ok(())
    }

    /// Index a single record outside the batch flow.
    pub async fn index_record(&self, record: &Record) -> Result<()> {
        info!("Indexing {}({})", record.collection, record.id);

        let document = self.documentifier.documentify(record);
        self.engine
            .index_document(&self.config.index, &record.collection, &record.id, document)
            .await?;
        Ok(())
    }

    /// Remove a single record's document from the index.
    pub async fn remove_record(&self, record: &Record) -> Result<()> {
        info!("Removing {}({})", record.collection, record.id);

        self.engine
            .delete_document(&self.config.index, &record.collection, &record.id)
            .await?;
        Ok(())
    }

    /// Remove a set of records in one bulk call; documents already absent
    /// from the index are tolerated.
    pub async fn remove_records(&self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let actions = records
            .iter()
            .map(|record| BulkAction::delete(record.collection.clone(), record.id.clone()))
            .collect();

        let response = self.engine.bulk(&self.config.index, actions).await?;
        if response.errors {
            for item in &response.items {
                if let Some(failure) = &item.error {
                    warn!(
                        "[{}] [{}] {}",
                        item.action, failure.error_type, failure.reason
                    );
                }
            }
        }
        Ok(())
    }
}
