//! S3-backed engine.
//!
//! Each row is one JSON object at `<prefix><table>/<partition>/<clustering>.json`.
//! S3 lists keys in ascending byte order, which is clustering order for our
//! encoded keys, so a partition scan is a `ListObjectsV2` over the partition
//! prefix with `start_after` at the range start and `max_keys` carrying the
//! row cap.

use aws_sdk_s3::Client;
use tracing::debug;

use crate::engine::{BoxFuture, RowPage, ScanRequest, StoredRow, WideColumnStore};
use crate::error::StorageError;
use crate::objects;

const ROW_SUFFIX: &str = ".json";

pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    fn table_prefix(&self, table: &str) -> String {
        format!("{}{table}/", self.prefix)
    }

    fn partition_prefix(&self, table: &str, partition: &str) -> String {
        format!("{}{table}/{partition}/", self.prefix)
    }

    fn object_key(&self, table: &str, partition: &str, clustering: &str) -> String {
        format!("{}{clustering}{ROW_SUFFIX}", self.partition_prefix(table, partition))
    }

    async fn scan_page(&self, request: &ScanRequest) -> Result<RowPage, StorageError> {
        let list_prefix = match &request.partition {
            Some(partition) => self.partition_prefix(request.table, partition),
            None => self.table_prefix(request.table),
        };
        // Stored keys always extend the range start, so `start_after` on the
        // bare start is inclusive of it.
        let start_after = match (&request.resume_after, &request.partition) {
            (Some(token), _) => Some(token.clone()),
            (None, Some(_)) => request.range.start().map(|s| format!("{list_prefix}{s}")),
            (None, None) => None,
        };

        let page = objects::list_keys_page(
            &self.client,
            &self.bucket,
            &list_prefix,
            start_after.as_deref(),
            request.max_rows.max(1),
        )
        .await?;
        debug!(
            bucket = %self.bucket,
            prefix = %list_prefix,
            keys = page.keys.len(),
            truncated = page.truncated,
            "listed row keys"
        );

        let mut rows = Vec::with_capacity(page.keys.len());
        let mut past_end = false;
        for key in &page.keys {
            let (partition, clustering) = split_key(&list_prefix, request, key)?;
            if !request.range.contains(&clustering) {
                // Within one partition keys only grow, so the first key past
                // the end closes the scan. Table scans filter per partition.
                if request.partition.is_some() {
                    past_end = true;
                    break;
                }
                continue;
            }
            match objects::get_object(&self.client, &self.bucket, key).await {
                Ok(body) => rows.push(StoredRow {
                    partition,
                    clustering,
                    body,
                }),
                // Deleted between list and get.
                Err(StorageError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        let resume_after = if page.truncated && !past_end {
            page.keys.last().cloned()
        } else {
            None
        };
        Ok(RowPage { rows, resume_after })
    }
}

fn split_key(
    list_prefix: &str,
    request: &ScanRequest,
    key: &str,
) -> Result<(String, String), StorageError> {
    let malformed = || StorageError::MalformedKey(key.to_string());
    let rest = key
        .strip_prefix(list_prefix)
        .and_then(|k| k.strip_suffix(ROW_SUFFIX))
        .ok_or_else(malformed)?;
    match &request.partition {
        Some(partition) if !rest.contains('/') => Ok((partition.clone(), rest.to_string())),
        Some(_) => Err(malformed()),
        None => rest
            .rsplit_once('/')
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .ok_or_else(malformed),
    }
}

impl WideColumnStore for S3Store {
    fn scan<'a>(
        &'a self,
        request: &'a ScanRequest,
    ) -> BoxFuture<'a, Result<RowPage, StorageError>> {
        Box::pin(self.scan_page(request))
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        partition: &'a str,
        clustering: &'a str,
    ) -> BoxFuture<'a, Result<Option<StoredRow>, StorageError>> {
        Box::pin(async move {
            let key = self.object_key(table, partition, clustering);
            match objects::get_object(&self.client, &self.bucket, &key).await {
                Ok(body) => Ok(Some(StoredRow {
                    partition: partition.to_string(),
                    clustering: clustering.to_string(),
                    body,
                })),
                Err(StorageError::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    fn put<'a>(
        &'a self,
        table: &'a str,
        row: StoredRow,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let key = self.object_key(table, &row.partition, &row.clustering);
            objects::put_object(
                &self.client,
                &self.bucket,
                &key,
                row.body,
                Some("application/json"),
            )
            .await
        })
    }
}
