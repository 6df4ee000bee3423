use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A domain record as handed over by the record provider.
///
/// The engine treats the payload as opaque: only the identity, the
/// collection tag, the two timestamps and the soft-delete flag drive
/// indexing decisions. Everything else is the documentifier's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier within the collection.
    pub id: String,
    /// Collection (module) this record belongs to.
    pub collection: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Soft-delete marker; deleted records propagate as index deletions.
    pub deleted: bool,
    /// Opaque field payload, consumed by the documentifier.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        collection: impl Into<String>,
        created_at: DateTime<Utc>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            collection: collection.into(),
            created_at,
            modified_at,
            deleted: false,
            fields: Map::new(),
        }
    }

    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    pub fn soft_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }
}

/// Differential fetch filter.
///
/// Matches records with `modified_at > since` or `created_at > since`.
/// The comparison is strictly greater: with second-granularity checkpoints
/// a record touched in the same second as the checkpoint can be missed and
/// is picked up by the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeFilter {
    pub since: DateTime<Utc>,
}

impl TimeFilter {
    pub fn since(since: DateTime<Utc>) -> Self {
        Self { since }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.modified_at > self.since || record.created_at > self.since
    }
}
