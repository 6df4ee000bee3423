use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Indexer configuration.
///
/// Loaded from whatever outer configuration layer the host application
/// uses; every field has a working default so `IndexerConfig::default()`
/// is a runnable setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Master switch; a disabled indexer refuses to run.
    pub enabled: bool,
    /// Name of the search index all collections are written to.
    pub index: String,
    /// Maximum number of operations per bulk request.
    pub batch_size: usize,
    /// Attempt differential indexing when a previous-run checkpoint exists.
    pub differential: bool,
    /// Location of the global last-run checkpoint file.
    pub lock_file: PathBuf,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            index: "main".to_string(),
            batch_size: 1000,
            differential: true,
            lock_file: PathBuf::from("cache/searchsync-index.lock"),
        }
    }
}
