use searchsync_backend::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Search engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Provider error for collection {collection}: {message}")]
    Provider { collection: String, message: String },

    #[error("Checkpoint not found for collection: {0}")]
    CheckpointNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IndexerError {
    pub fn provider<E: std::fmt::Display>(collection: impl Into<String>, e: E) -> Self {
        Self::Provider {
            collection: collection.into(),
            message: e.to_string(),
        }
    }

    pub fn serialization<E: std::fmt::Display>(e: E) -> Self {
        Self::Serialization(e.to_string())
    }

    pub fn config<E: std::fmt::Display>(e: E) -> Self {
        Self::Config(e.to_string())
    }

    /// True when the error is the per-collection checkpoint-absent signal.
    pub fn is_checkpoint_not_found(&self) -> bool {
        matches!(self, Self::CheckpointNotFound(_))
    }
}
