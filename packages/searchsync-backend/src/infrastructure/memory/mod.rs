//! In-memory search engine backend.
//!
//! Keeps indices, documents and mapping metadata in process memory behind a
//! mutex. Used as the default embedded backend and as the engine for
//! integration tests. Semantics follow the port contract:
//!
//! - `delete_index` / `delete_document` tolerate absence
//! - `bulk` and `index_document` auto-create a missing index, the way a
//!   permissive engine does
//! - `put_meta` requires the index to exist

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::domain::{
    BulkAction, BulkItemResult, BulkResponse, Document, MetaMap, SearchEngine,
};
use crate::error::{EngineError, Result};

#[derive(Debug, Default)]
struct IndexState {
    mapping: Value,
    /// Per-collection mapping metadata blocks.
    meta: HashMap<String, MetaMap>,
    /// Documents keyed by collection, then by id.
    documents: HashMap<String, BTreeMap<String, Document>>,
}

/// In-memory [`SearchEngine`] backend.
#[derive(Default)]
pub struct MemoryEngine {
    indices: Mutex<HashMap<String, IndexState>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live documents for one collection. Zero when the index or
    /// collection is absent.
    pub fn document_count(&self, index: &str, collection: &str) -> usize {
        let indices = self.indices.lock();
        indices
            .get(index)
            .and_then(|state| state.documents.get(collection))
            .map_or(0, |docs| docs.len())
    }

    /// Fetch one document by id.
    pub fn document(&self, index: &str, collection: &str, id: &str) -> Option<Document> {
        let indices = self.indices.lock();
        indices
            .get(index)?
            .documents
            .get(collection)?
            .get(id)
            .cloned()
    }

    pub fn index_exists(&self, index: &str) -> bool {
        self.indices.lock().contains_key(index)
    }

    /// Mapping body the index was created with.
    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.indices.lock().get(index).map(|s| s.mapping.clone())
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn create_index(&self, index: &str, mapping: Value) -> Result<()> {
        let mut indices = self.indices.lock();
        if indices.contains_key(index) {
            return Err(EngineError::index_exists(index));
        }
        indices.insert(
            index.to_string(),
            IndexState {
                mapping,
                ..Default::default()
            },
        );
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<()> {
        self.indices.lock().remove(index);
        Ok(())
    }

    async fn delete_all_indices(&self) -> Result<()> {
        self.indices.lock().clear();
        Ok(())
    }

    async fn bulk(&self, index: &str, actions: Vec<BulkAction>) -> Result<BulkResponse> {
        let mut indices = self.indices.lock();
        let state = indices.entry(index.to_string()).or_default();

        let mut items = Vec::with_capacity(actions.len());
        for action in actions {
            let kind = action.kind();
            match action {
                BulkAction::Index {
                    collection,
                    id,
                    document,
                } => {
                    state
                        .documents
                        .entry(collection)
                        .or_default()
                        .insert(id.clone(), document);
                    items.push(BulkItemResult::ok(kind, id));
                }
                BulkAction::Delete { collection, id } => {
                    if let Some(docs) = state.documents.get_mut(&collection) {
                        docs.remove(&id);
                    }
                    items.push(BulkItemResult::ok(kind, id));
                }
            }
        }

        Ok(BulkResponse::new(items))
    }

    async fn get_meta(&self, index: &str, collection: &str) -> Result<Option<MetaMap>> {
        let indices = self.indices.lock();
        Ok(indices
            .get(index)
            .and_then(|state| state.meta.get(collection))
            .cloned())
    }

    async fn put_meta(&self, index: &str, collection: &str, meta: MetaMap) -> Result<()> {
        let mut indices = self.indices.lock();
        let state = indices
            .get_mut(index)
            .ok_or_else(|| EngineError::index_not_found(index))?;
        state.meta.insert(collection.to_string(), meta);
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<()> {
        let mut indices = self.indices.lock();
        let state = indices.entry(index.to_string()).or_default();
        state
            .documents
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn delete_document(&self, index: &str, collection: &str, id: &str) -> Result<()> {
        let mut indices = self.indices.lock();
        if let Some(state) = indices.get_mut(index) {
            if let Some(docs) = state.documents.get_mut(collection) {
                docs.remove(id);
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<bool> {
        Ok(true)
    }
}
