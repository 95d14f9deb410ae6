use std::future::Future;
use std::pin::Pin;

use colonnade_core::predicate::KeyRange;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A raw row as held by an engine: encoded keys plus the serialized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub partition: String,
    pub clustering: String,
    pub body: Vec<u8>,
}

/// One page request against a table.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub table: &'static str,
    /// Exact-match partition. `None` walks every partition of the table in
    /// partition key order.
    pub partition: Option<String>,
    /// Clustering key range, applied within each partition visited.
    pub range: KeyRange,
    /// Opaque token from the previous page of this scan.
    pub resume_after: Option<String>,
    /// Upper bound on rows in the returned page. Always >= 1.
    pub max_rows: usize,
}

impl ScanRequest {
    pub fn partition(table: &'static str, partition: String, range: KeyRange) -> Self {
        Self {
            table,
            partition: Some(partition),
            range,
            resume_after: None,
            max_rows: 1,
        }
    }

    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            partition: None,
            range: KeyRange::all(),
            resume_after: None,
            max_rows: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowPage {
    /// Rows in ascending clustering key order.
    pub rows: Vec<StoredRow>,
    /// Token to pass back for the next page. `None` once the scan is done.
    pub resume_after: Option<String>,
}

impl RowPage {
    pub fn exhausted() -> Self {
        Self::default()
    }
}

/// The capability the read path needs from a wide-column engine.
///
/// Engines iterate clustering keys in ascending byte order and enforce
/// `max_rows` themselves, so a limit is never emulated by over-fetching.
/// A partition that was never written scans as empty.
pub trait WideColumnStore: Send + Sync {
    /// Fetch one page of rows.
    fn scan<'a>(&'a self, request: &'a ScanRequest)
    -> BoxFuture<'a, Result<RowPage, StorageError>>;

    /// Fetch a single row by its full key. `None` if absent.
    fn get<'a>(
        &'a self,
        table: &'a str,
        partition: &'a str,
        clustering: &'a str,
    ) -> BoxFuture<'a, Result<Option<StoredRow>, StorageError>>;

    /// Write a row, replacing any row with the same key.
    fn put<'a>(&'a self, table: &'a str, row: StoredRow) -> BoxFuture<'a, Result<(), StorageError>>;
}
