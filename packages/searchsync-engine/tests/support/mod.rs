//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use searchsync_backend::infrastructure::MemoryEngine;
use searchsync_backend::{
    BulkAction, BulkFailure, BulkItemResult, BulkResponse, Document, MetaMap,
    Result as EngineResult, SearchEngine,
};
use searchsync_engine::{IndexerError, Record, RecordProvider, Result, TimeFilter};
use serde_json::{json, Value};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn record(id: &str, collection: &str, created: DateTime<Utc>, modified: DateTime<Utc>) -> Record {
    let mut fields = Document::new();
    fields.insert("name".to_string(), json!(id));
    fields.insert("collection".to_string(), json!(collection));
    Record::new(id, collection, created, modified).with_fields(fields)
}

/// Provider over mutable in-memory record sets, honoring the differential
/// filter and soft-delete visibility the way a real source would.
#[derive(Default)]
pub struct MemoryProvider {
    records: Mutex<HashMap<String, Vec<Record>>>,
    failing: Mutex<HashSet<String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, collection: &str, records: Vec<Record>) {
        self.records
            .lock()
            .unwrap()
            .insert(collection.to_string(), records);
    }

    pub fn upsert_record(&self, record: Record) {
        let mut records = self.records.lock().unwrap();
        let list = records.entry(record.collection.clone()).or_default();
        if let Some(existing) = list.iter_mut().find(|r| r.id == record.id) {
            *existing = record;
        } else {
            list.push(record);
        }
    }

    pub fn fail_collection(&self, collection: &str) {
        self.failing.lock().unwrap().insert(collection.to_string());
    }
}

#[async_trait]
impl RecordProvider for MemoryProvider {
    async fn fetch(
        &self,
        collection: &str,
        filter: Option<TimeFilter>,
        include_deleted: bool,
    ) -> Result<Option<Vec<Record>>> {
        if self.failing.lock().unwrap().contains(collection) {
            return Err(IndexerError::provider(collection, "simulated provider outage"));
        }

        let records = self.records.lock().unwrap();
        let Some(all) = records.get(collection) else {
            return Ok(None);
        };

        let selected: Vec<Record> = all
            .iter()
            .filter(|r| filter.map_or(true, |f| f.matches(r)))
            .filter(|r| include_deleted || !r.deleted)
            .cloned()
            .collect();
        Ok(Some(selected))
    }
}

/// Engine wrapper that records every bulk call and can fail chosen ids,
/// delegating actual state to a [`MemoryEngine`].
pub struct RecordingEngine {
    pub inner: MemoryEngine,
    calls: Mutex<Vec<Vec<BulkAction>>>,
    fail_ids: Mutex<HashSet<String>>,
}

impl RecordingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryEngine::new(),
            calls: Mutex::new(Vec::new()),
            fail_ids: Mutex::new(HashSet::new()),
        })
    }

    pub fn fail_id(&self, id: &str) {
        self.fail_ids.lock().unwrap().insert(id.to_string());
    }

    pub fn bulk_call_sizes(&self) -> Vec<usize> {
        self.calls.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Ids of every action flushed so far, in flush order.
    pub fn flushed_ids(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .map(|a| a.id().to_string())
            .collect()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl SearchEngine for RecordingEngine {
    async fn create_index(&self, index: &str, mapping: Value) -> EngineResult<()> {
        self.inner.create_index(index, mapping).await
    }

    async fn delete_index(&self, index: &str) -> EngineResult<()> {
        self.inner.delete_index(index).await
    }

    async fn delete_all_indices(&self) -> EngineResult<()> {
        self.inner.delete_all_indices().await
    }

    async fn bulk(&self, index: &str, actions: Vec<BulkAction>) -> EngineResult<BulkResponse> {
        let fail_ids = self.fail_ids.lock().unwrap().clone();

        let mut items = Vec::with_capacity(actions.len());
        let mut applied = Vec::new();
        for action in &actions {
            if fail_ids.contains(action.id()) {
                items.push(BulkItemResult::failed(
                    action.kind(),
                    action.id(),
                    BulkFailure::new("mapper_parsing_exception", "injected failure"),
                ));
            } else {
                items.push(BulkItemResult::ok(action.kind(), action.id()));
                applied.push(action.clone());
            }
        }

        self.inner.bulk(index, applied).await?;
        self.calls.lock().unwrap().push(actions);
        Ok(BulkResponse::new(items))
    }

    async fn get_meta(&self, index: &str, collection: &str) -> EngineResult<Option<MetaMap>> {
        self.inner.get_meta(index, collection).await
    }

    async fn put_meta(&self, index: &str, collection: &str, meta: MetaMap) -> EngineResult<()> {
        self.inner.put_meta(index, collection, meta).await
    }

    async fn index_document(
        &self,
        index: &str,
        collection: &str,
        id: &str,
        document: Document,
    ) -> EngineResult<()> {
        self.inner.index_document(index, collection, id, document).await
    }

    async fn delete_document(&self, index: &str, collection: &str, id: &str) -> EngineResult<()> {
        self.inner.delete_document(index, collection, id).await
    }

    async fn ping(&self) -> EngineResult<bool> {
        self.inner.ping().await
    }
}
