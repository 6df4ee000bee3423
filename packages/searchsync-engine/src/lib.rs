/*
 * searchsync-engine - Incremental Search Index Synchronization
 *
 * Keeps a search index consistent with a changing relational data source.
 *
 * Architecture:
 * - Checkpoint Store (global lock file + per-collection mapping metadata)
 * - Batch Writer (bounded bulk batches, optimistic counter reconciliation)
 * - Collection Indexer (full/differential per collection)
 * - Run Coordinator (index lifecycle, per-collection failure isolation)
 * - Statistics (run summary, throughput extrapolation)
 */

// Public modules
pub mod batch;
pub mod checkpoint;
pub mod config;
pub mod coordinator;
pub mod document;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod provider;
pub mod record;
pub mod stats;

// Re-exports
pub use batch::{BatchOperation, BatchWriter};
pub use checkpoint::{CheckpointStore, COLLECTION_CHECKPOINT_KEY};
pub use config::IndexerConfig;
pub use coordinator::RunCoordinator;
pub use document::{Documentifier, FieldsDocumentifier};
pub use error::{IndexerError, Result};
pub use indexer::CollectionIndexer;
pub use provider::RecordProvider;
pub use record::{Record, TimeFilter};
pub use stats::{RunCounters, Summary, ESTIMATE_THRESHOLD, REFERENCE_VOLUME};

// Engine port re-exports, so hosts wire a backend without naming the
// backend crate everywhere.
pub use searchsync_backend::{
    default_mapping_body, BulkAction, BulkActionKind, BulkFailure, BulkItemResult, BulkResponse,
    Document, MetaMap, SearchEngine,
};
