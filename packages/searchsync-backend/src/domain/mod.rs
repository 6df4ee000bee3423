//! Domain layer for the search engine port
//!
//! # Core Contract
//!
//! The synchronization engine talks to a search engine exclusively through
//! the [`SearchEngine`] trait: index lifecycle, bulk writes, per-collection
//! mapping metadata, and a liveness probe. Backends (in-memory, HTTP) are
//! swapped behind this port without touching the engine.
//!
//! # Bulk Model
//!
//! A bulk request is an ordered sequence of [`BulkAction`]s against one
//! index. The response carries one [`BulkItemResult`] per action, in the
//! same order, plus an overall error flag. Per-item failures name the
//! action, an engine-reported error type and a reason string, which is the
//! detail the caller needs to reconcile optimistic counters.
//!
//! # Examples
//!
//! ```rust,ignore
//! use searchsync_backend::{BulkAction, SearchEngine};
//!
//! async fn example(engine: &dyn SearchEngine) -> searchsync_backend::Result<()> {
//!     let actions = vec![BulkAction::index("contacts", "id-1", document)];
//!     let response = engine.bulk("main", actions).await?;
//!     assert!(!response.errors);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::Result;

/// Indexable document body: field name to value.
pub type Document = Map<String, Value>;

/// Per-collection mapping metadata: key to value.
pub type MetaMap = Map<String, Value>;

// ═══════════════════════════════════════════════════════════════════════════
// Bulk Model
// ═══════════════════════════════════════════════════════════════════════════

/// The two action kinds a bulk request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkActionKind {
    Index,
    Delete,
}

impl BulkActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkActionKind::Index => "index",
            BulkActionKind::Delete => "delete",
        }
    }
}

impl std::fmt::Display for BulkActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a bulk request, scoped to a collection (document type)
/// within the target index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum BulkAction {
    /// Index (upsert) a document under the given id.
    Index {
        collection: String,
        id: String,
        document: Document,
    },
    /// Delete the document with the given id.
    Delete { collection: String, id: String },
}

impl BulkAction {
    pub fn index(
        collection: impl Into<String>,
        id: impl Into<String>,
        document: Document,
    ) -> Self {
        Self::Index {
            collection: collection.into(),
            id: id.into(),
            document,
        }
    }

    pub fn delete(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Delete {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn kind(&self) -> BulkActionKind {
        match self {
            BulkAction::Index { .. } => BulkActionKind::Index,
            BulkAction::Delete { .. } => BulkActionKind::Delete,
        }
    }

    pub fn collection(&self) -> &str {
        match self {
            BulkAction::Index { collection, .. } | BulkAction::Delete { collection, .. } => {
                collection
            }
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BulkAction::Index { id, .. } | BulkAction::Delete { id, .. } => id,
        }
    }
}

/// Engine-reported failure detail for one bulk item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    /// Engine error type, e.g. `mapper_parsing_exception`.
    pub error_type: String,
    /// Human-readable reason string.
    pub reason: String,
}

impl BulkFailure {
    pub fn new(error_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one action within a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemResult {
    pub action: BulkActionKind,
    pub id: String,
    /// `None` on success.
    pub error: Option<BulkFailure>,
}

impl BulkItemResult {
    pub fn ok(action: BulkActionKind, id: impl Into<String>) -> Self {
        Self {
            action,
            id: id.into(),
            error: None,
        }
    }

    pub fn failed(action: BulkActionKind, id: impl Into<String>, failure: BulkFailure) -> Self {
        Self {
            action,
            id: id.into(),
            error: Some(failure),
        }
    }
}

/// Response to a bulk request: per-item results in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    /// True if at least one item failed.
    pub errors: bool,
    pub items: Vec<BulkItemResult>,
}

impl BulkResponse {
    pub fn new(items: Vec<BulkItemResult>) -> Self {
        let errors = items.iter().any(|item| item.error.is_some());
        Self { errors, items }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Search engine port.
///
/// Implementations must make `delete_index` idempotent: deleting an index
/// that does not exist is a success, never an error.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Create an index with the given mapping body.
    async fn create_index(&self, index: &str, mapping: Value) -> Result<()>;

    /// Delete an index. Absence is tolerated.
    async fn delete_index(&self, index: &str) -> Result<()>;

    /// Delete every index the engine holds. Nothing to delete is fine.
    async fn delete_all_indices(&self) -> Result<()>;

    /// Submit an ordered sequence of actions in one call.
    async fn bulk(&self, index: &str, actions: Vec<BulkAction>) -> Result<BulkResponse>;

    /// Read a collection's mapping metadata. `None` when the collection has
    /// no metadata block at all.
    async fn get_meta(&self, index: &str, collection: &str) -> Result<Option<MetaMap>>;

    /// Write a collection's mapping metadata, replacing the whole block.
    async fn put_meta(&self, index: &str, collection: &str, meta: MetaMap) -> Result<()>;

    /// Index a single document outside the bulk flow.
    async fn index_document(
        &self,
        index: &str,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<()>;

    /// Delete a single document. Absence is tolerated.
    async fn delete_document(&self, index: &str, collection: &str, id: &str) -> Result<()>;

    /// Liveness probe.
    async fn ping(&self) -> Result<bool>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Default Mapping
// ═══════════════════════════════════════════════════════════════════════════

/// Default index mapping applied on full-index creation.
///
/// `name.name`/`name.first`/`name.last` are copied into an aggregate
/// searchable `named` field; each carries an exact-match `keyword`
/// sub-field capped at 256 characters.
pub fn default_mapping_body() -> Value {
    let keyword_fields = json!({
        "keyword": {
            "type": "keyword",
            "ignore_above": 256
        }
    });

    json!({
        "mappings": {
            "_default_": {
                "properties": {
                    "name": {
                        "properties": {
                            "name": {
                                "type": "text",
                                "copy_to": "named",
                                "fields": keyword_fields
                            },
                            "first": {
                                "type": "text",
                                "copy_to": "named",
                                "fields": keyword_fields
                            },
                            "last": {
                                "type": "text",
                                "copy_to": "named",
                                "fields": keyword_fields
                            }
                        }
                    },
                    "named": {
                        "type": "text",
                        "fields": keyword_fields
                    }
                }
            }
        }
    })
}
