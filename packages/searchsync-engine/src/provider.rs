use async_trait::async_trait;

use crate::error::Result;
use crate::record::{Record, TimeFilter};

/// Record source port.
///
/// One provider serves every collection the engine is configured with. The
/// differential path passes a [`TimeFilter`] (records modified or created
/// after the collection checkpoint) and asks for soft-deleted records so
/// deletions propagate; the full path passes no filter and excludes them.
///
/// `Ok(None)` means the collection has no rows yet: a normal terminal,
/// not an error.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    async fn fetch(
        &self,
        collection: &str,
        filter: Option<TimeFilter>,
        include_deleted: bool,
    ) -> Result<Option<Vec<Record>>>;
}
