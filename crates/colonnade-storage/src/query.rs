//! Range query engine.
//!
//! Turns a logical read (whole partition, latest N, clustering prefix,
//! clustering range) into an exact partition match, a clustering key range
//! and a row cap, and hands back a [`RowCursor`] that pages through the
//! engine lazily.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;

use colonnade_core::clustering::ClusteringValue;
use colonnade_core::keys::PartitionKey;
use colonnade_core::predicate::{ColumnRange, KeyRange, Limit};
use colonnade_core::row::Row;
use tracing::debug;

use crate::engine::{ScanRequest, StoredRow, WideColumnStore};
use crate::error::QueryError;

pub struct RangeQueryEngine<R> {
    store: Arc<dyn WideColumnStore>,
    page_size: usize,
    _row: PhantomData<fn() -> R>,
}

impl<R> Clone for RangeQueryEngine<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            page_size: self.page_size,
            _row: PhantomData,
        }
    }
}

impl<R: Row> RangeQueryEngine<R> {
    pub fn new(store: Arc<dyn WideColumnStore>, page_size: usize) -> Self {
        Self {
            store,
            page_size: page_size.max(1),
            _row: PhantomData,
        }
    }

    /// Every row of a partition in clustering order.
    pub fn scan_all(&self, partition: &R::Partition) -> RowCursor<R> {
        self.cursor(Some(partition.encode()), KeyRange::all(), None)
    }

    /// The first `limit` rows of a partition. With descending clustering
    /// these are the latest `limit` rows.
    pub fn scan_bounded(&self, partition: &R::Partition, limit: Limit) -> RowCursor<R> {
        self.cursor(Some(partition.encode()), KeyRange::all(), Some(limit))
    }

    /// Rows whose leading clustering columns equal `prefix`.
    pub fn scan_prefix(
        &self,
        partition: &R::Partition,
        prefix: &[ClusteringValue],
        limit: Option<Limit>,
    ) -> Result<RowCursor<R>, QueryError> {
        let range = R::CLUSTERING.prefix_range(prefix)?;
        Ok(self.cursor(Some(partition.encode()), range, limit))
    }

    /// Rows inside an inclusive range on one clustering column, with the
    /// preceding columns fixed. Refuses inverted or ill-typed ranges.
    pub fn scan_range(
        &self,
        partition: &R::Partition,
        range: &ColumnRange,
    ) -> Result<RowCursor<R>, QueryError> {
        let range = R::CLUSTERING.column_range(range)?;
        Ok(self.cursor(Some(partition.encode()), range, None))
    }

    /// Every row of the table, partition by partition.
    pub fn scan_table(&self) -> RowCursor<R> {
        self.cursor(None, KeyRange::all(), None)
    }

    /// A single row by full key.
    pub async fn get(
        &self,
        partition: &R::Partition,
        clustering: &[ClusteringValue],
    ) -> Result<Option<R>, QueryError> {
        let key = R::CLUSTERING.encode_key(clustering)?;
        let row = self
            .store
            .get(R::table(), &partition.encode(), &key)
            .await?;
        row.map(|r| decode(&r)).transpose()
    }

    /// Validate and write a row.
    pub async fn append(&self, row: &R) -> Result<(), QueryError> {
        row.validate()?;
        let stored = StoredRow {
            partition: row.partition_key()?.encode(),
            clustering: row.clustering_key()?,
            body: row.to_bytes()?,
        };
        self.store.put(R::table(), stored).await?;
        Ok(())
    }

    fn cursor(
        &self,
        partition: Option<String>,
        range: KeyRange,
        limit: Option<Limit>,
    ) -> RowCursor<R> {
        let request = ScanRequest {
            table: R::table(),
            partition,
            range,
            resume_after: None,
            max_rows: self.page_size,
        };
        RowCursor {
            store: Arc::clone(&self.store),
            request,
            page_size: self.page_size,
            remaining: limit.map(Limit::get),
            buffer: VecDeque::new(),
            exhausted: false,
            _row: PhantomData,
        }
    }
}

fn decode<R: Row>(row: &StoredRow) -> Result<R, QueryError> {
    R::from_bytes(&row.body).map_err(|e| {
        QueryError::CorruptRow(format!(
            "{}/{}/{}: {e}",
            R::table(),
            row.partition,
            row.clustering
        ))
    })
}

/// A lazy, finite sequence of rows in clustering order.
///
/// Rows are fetched a page at a time; each page asks the engine for at most
/// `min(page_size, remaining limit)` rows. The cursor owns everything it
/// holds, so dropping it mid-scan releases it. Re-issuing the same scan
/// yields the same rows as long as nothing was written in between.
pub struct RowCursor<R> {
    store: Arc<dyn WideColumnStore>,
    request: ScanRequest,
    page_size: usize,
    remaining: Option<usize>,
    buffer: VecDeque<StoredRow>,
    exhausted: bool,
    _row: PhantomData<fn() -> R>,
}

impl<R: Row> RowCursor<R> {
    pub async fn next(&mut self) -> Result<Option<R>, QueryError> {
        loop {
            if self.remaining == Some(0) {
                return Ok(None);
            }
            if let Some(row) = self.buffer.pop_front() {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                return decode(&row).map(Some);
            }
            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    /// Drain the cursor into a vector.
    pub async fn collect(mut self) -> Result<Vec<R>, QueryError> {
        let mut rows = Vec::new();
        while let Some(row) = self.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    async fn fetch_page(&mut self) -> Result<(), QueryError> {
        self.request.max_rows = self
            .remaining
            .map_or(self.page_size, |r| r.min(self.page_size));
        let page = self.store.scan(&self.request).await?;
        debug!(
            table = self.request.table,
            partition = self.request.partition.as_deref().unwrap_or("*"),
            rows = page.rows.len(),
            more = page.resume_after.is_some(),
            "fetched page"
        );
        match page.resume_after {
            Some(token) => self.request.resume_after = Some(token),
            None => self.exhausted = true,
        }
        self.buffer.extend(page.rows);
        Ok(())
    }
}
