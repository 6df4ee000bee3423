//! Error types for searchsync-backend

use std::fmt;
use thiserror::Error;

/// Engine error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failures (connection refused, timeout)
    Transport,
    /// Index does not exist where one was required
    IndexNotFound,
    /// Index already exists on create
    IndexExists,
    /// Mapping/metadata read or write failures
    Mapping,
    /// Bulk endpoint rejected the request as a whole
    Bulk,
    /// Serialization/deserialization errors
    Serialization,
    /// Configuration errors
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::IndexNotFound => "index_not_found",
            ErrorKind::IndexExists => "index_exists",
            ErrorKind::Mapping => "mapping",
            ErrorKind::Bulk => "bulk",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engine error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct EngineError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn index_not_found(index: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::IndexNotFound,
            format!("Index not found: {}", index.into()),
        )
    }

    pub fn index_exists(index: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::IndexExists,
            format!("Index already exists: {}", index.into()),
        )
    }

    pub fn mapping(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Mapping, message)
    }

    pub fn bulk(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Bulk, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }
}

// JSON error conversions
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::new(
            ErrorKind::Serialization,
            format!("JSON error: {}", err),
        )
        .with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
