use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::RwLock;

use crate::engine::{BoxFuture, RowPage, ScanRequest, StoredRow, WideColumnStore};
use crate::error::StorageError;

/// Separates partition and clustering key inside a table-scan resume token.
/// Never appears in a validated key.
const TOKEN_SEP: char = '\u{1f}';

type Partition = BTreeMap<String, Vec<u8>>;
type Table = BTreeMap<String, Partition>;

/// In-process engine: tables of partitions of clustering-ordered rows.
///
/// The lock is held for one page at a time, never across a whole scan.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<String, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_page(&self, request: &ScanRequest) -> Result<RowPage, StorageError> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let Some(table) = tables.get(request.table) else {
            return Ok(RowPage::exhausted());
        };
        let limit = request.max_rows.max(1);
        let mut rows = Vec::new();

        let more = match &request.partition {
            Some(partition) => match table.get(partition) {
                Some(part) => scan_partition(
                    part,
                    partition,
                    request,
                    request.resume_after.as_deref(),
                    limit,
                    &mut rows,
                ),
                None => false,
            },
            None => {
                let resume = request
                    .resume_after
                    .as_deref()
                    .and_then(|t| t.split_once(TOKEN_SEP));
                let first = resume.map_or(Bound::Unbounded, |(p, _)| Bound::Included(p));
                let mut more = false;
                for (partition, part) in table.range::<str, _>((first, Bound::Unbounded)) {
                    let after = resume
                        .filter(|(p, _)| *p == partition.as_str())
                        .map(|(_, c)| c);
                    if scan_partition(part, partition, request, after, limit, &mut rows) {
                        more = true;
                        break;
                    }
                }
                more
            }
        };

        let resume_after = match rows.last() {
            Some(last) if more => Some(match request.partition {
                Some(_) => last.clustering.clone(),
                None => format!("{}{TOKEN_SEP}{}", last.partition, last.clustering),
            }),
            _ => None,
        };
        Ok(RowPage { rows, resume_after })
    }
}

/// Appends rows of one partition to `out` until it holds `limit` rows.
/// Returns true if rows in range remain after that.
fn scan_partition(
    rows: &Partition,
    partition: &str,
    request: &ScanRequest,
    after: Option<&str>,
    limit: usize,
    out: &mut Vec<StoredRow>,
) -> bool {
    let lower = match after {
        Some(key) => Bound::Excluded(key),
        None => request
            .range
            .start()
            .map_or(Bound::Unbounded, Bound::Included),
    };
    let upper = request.range.end().map_or(Bound::Unbounded, Bound::Excluded);
    if let (Bound::Included(l) | Bound::Excluded(l), Bound::Excluded(u)) = (lower, upper)
        && l >= u
    {
        return false;
    }

    for (clustering, body) in rows.range::<str, _>((lower, upper)) {
        if out.len() == limit {
            return true;
        }
        out.push(StoredRow {
            partition: partition.to_string(),
            clustering: clustering.clone(),
            body: body.clone(),
        });
    }
    false
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

impl WideColumnStore for MemoryStore {
    fn scan<'a>(
        &'a self,
        request: &'a ScanRequest,
    ) -> BoxFuture<'a, Result<RowPage, StorageError>> {
        Box::pin(async move { self.scan_page(request) })
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        partition: &'a str,
        clustering: &'a str,
    ) -> BoxFuture<'a, Result<Option<StoredRow>, StorageError>> {
        Box::pin(async move {
            let tables = self.tables.read().map_err(|_| poisoned())?;
            let row = tables
                .get(table)
                .and_then(|t| t.get(partition))
                .and_then(|p| p.get(clustering))
                .map(|body| StoredRow {
                    partition: partition.to_string(),
                    clustering: clustering.to_string(),
                    body: body.clone(),
                });
            Ok(row)
        })
    }

    fn put<'a>(
        &'a self,
        table: &'a str,
        row: StoredRow,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut tables = self.tables.write().map_err(|_| poisoned())?;
            tables
                .entry(table.to_string())
                .or_default()
                .entry(row.partition)
                .or_default()
                .insert(row.clustering, row.body);
            Ok(())
        })
    }
}
