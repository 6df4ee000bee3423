use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use searchsync_backend::{MetaMap, SearchEngine};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{IndexerError, Result};

/// Reserved mapping-metadata key holding a collection's last-indexed time.
pub const COLLECTION_CHECKPOINT_KEY: &str = "last_index";

/// Persists the two checkpoint levels the engine relies on:
///
/// - the **global** last-successful-run timestamp, a small file holding
///   integer Unix seconds;
/// - the **per-collection** last-indexed timestamp, stored inside the
///   search engine itself as mapping metadata under
///   [`COLLECTION_CHECKPOINT_KEY`].
pub struct CheckpointStore {
    lock_file: PathBuf,
    index: String,
    engine: Arc<dyn SearchEngine>,
}

impl CheckpointStore {
    pub fn new(lock_file: PathBuf, index: impl Into<String>, engine: Arc<dyn SearchEngine>) -> Self {
        Self {
            lock_file,
            index: index.into(),
            engine,
        }
    }

    /// Read the global checkpoint.
    ///
    /// A missing file, unparsable content or a zero timestamp all mean
    /// "no prior run" and return `None`, never an error.
    pub fn read_global(&self) -> Option<DateTime<Utc>> {
        info!("Reading lock file {}", self.lock_file.display());

        let raw = match std::fs::read_to_string(&self.lock_file) {
            Ok(raw) => raw,
            Err(_) => {
                info!("Lock file not found");
                return None;
            }
        };

        let seconds = raw.trim().parse::<i64>().unwrap_or(0);
        if seconds <= 0 {
            warn!("Failed to read lock file, treating as no prior run");
            return None;
        }

        let timestamp = DateTime::from_timestamp(seconds, 0)?;
        info!(
            "Last logged indexing performed on {}",
            timestamp.format("%Y-%m-%d %H:%M:%S")
        );
        Some(timestamp)
    }

    /// Overwrite the global checkpoint with the given timestamp.
    pub fn write_global(&self, timestamp: DateTime<Utc>) -> Result<()> {
        info!("Writing lock file to {}", self.lock_file.display());

        if let Some(parent) = self.lock_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.lock_file, timestamp.timestamp().to_string())?;
        Ok(())
    }

    /// Read a collection's checkpoint from its mapping metadata.
    ///
    /// An absent metadata block, an absent [`COLLECTION_CHECKPOINT_KEY`]
    /// field and an unparsable value all map to
    /// [`IndexerError::CheckpointNotFound`].
    pub async fn read_collection(&self, collection: &str) -> Result<DateTime<Utc>> {
        let meta = self
            .engine
            .get_meta(&self.index, collection)
            .await?
            .ok_or_else(|| IndexerError::CheckpointNotFound(collection.to_string()))?;

        meta.get(COLLECTION_CHECKPOINT_KEY)
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok_or_else(|| IndexerError::CheckpointNotFound(collection.to_string()))
    }

    /// Attach/overwrite a collection's checkpoint, leaving every other
    /// metadata field untouched.
    pub async fn write_collection(&self, collection: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let mut meta = self
            .engine
            .get_meta(&self.index, collection)
            .await?
            .unwrap_or_else(MetaMap::new);

        meta.insert(
            COLLECTION_CHECKPOINT_KEY.to_string(),
            Value::String(timestamp.to_rfc3339()),
        );

        self.engine.put_meta(&self.index, collection, meta).await?;
        Ok(())
    }
}
