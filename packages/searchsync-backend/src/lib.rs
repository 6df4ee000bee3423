//! searchsync-backend - Search engine port and backends
//!
//! This crate defines the contract between the synchronization engine and
//! whatever search engine it writes to, plus the backends implementing it.
//!
//! ## Layering
//!
//! - `domain`: the [`SearchEngine`] port trait, the bulk request/response
//!   model, and the default index mapping. No backend specifics.
//! - `infrastructure`: backend adapters. The in-memory backend ships behind
//!   the `memory` feature (on by default) and doubles as the test engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use searchsync_backend::{BulkAction, SearchEngine};
//! use searchsync_backend::infrastructure::MemoryEngine;
//!
//! let engine = MemoryEngine::new();
//! engine.create_index("main", searchsync_backend::default_mapping_body()).await?;
//! let response = engine.bulk("main", actions).await?;
//! ```

pub mod domain;
pub mod error;

#[cfg(feature = "memory")]
pub mod infrastructure;

pub use error::{EngineError, ErrorKind, Result};

// Domain re-exports
pub use domain::{
    default_mapping_body, BulkAction, BulkActionKind, BulkFailure, BulkItemResult, BulkResponse,
    Document, MetaMap, SearchEngine,
};
