#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use colonnade_core::ids::MessageId;
use colonnade_core::models::message::Message;
use colonnade_core::models::sensor_metric::SensorMetric;
use colonnade_storage::engine::{BoxFuture, RowPage, ScanRequest, StoredRow, WideColumnStore};
use colonnade_storage::error::StorageError;
use colonnade_storage::memory::MemoryStore;
use uuid::Uuid;

pub fn ts(s: &str) -> jiff::Timestamp {
    s.parse().unwrap()
}

pub fn message(conversation_id: Uuid, at: &str, text: &str) -> Message {
    let created_at = ts(at);
    Message {
        conversation_id,
        message_id: MessageId::at(created_at).unwrap(),
        sender_id: "user1".to_string(),
        sender_name: "Alice".to_string(),
        message_text: text.to_string(),
        created_at,
        is_read: false,
    }
}

pub fn reading(sensor: &str, at: &str, value: f64) -> SensorMetric {
    SensorMetric::new(sensor, ts(at), "temperature", value, "C").with_location("lab")
}

/// Wraps a [`MemoryStore`] and records every scan request it serves.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub scans: Mutex<Vec<ScanRequest>>,
}

impl RecordingStore {
    pub fn max_rows_seen(&self) -> Vec<usize> {
        self.scans.lock().unwrap().iter().map(|r| r.max_rows).collect()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.lock().unwrap().len()
    }
}

impl WideColumnStore for RecordingStore {
    fn scan<'a>(
        &'a self,
        request: &'a ScanRequest,
    ) -> BoxFuture<'a, Result<RowPage, StorageError>> {
        self.scans.lock().unwrap().push(request.clone());
        self.inner.scan(request)
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        partition: &'a str,
        clustering: &'a str,
    ) -> BoxFuture<'a, Result<Option<StoredRow>, StorageError>> {
        self.inner.get(table, partition, clustering)
    }

    fn put<'a>(
        &'a self,
        table: &'a str,
        row: StoredRow,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        self.inner.put(table, row)
    }
}

/// An engine that is always down.
pub struct UnreachableStore;

impl WideColumnStore for UnreachableStore {
    fn scan<'a>(
        &'a self,
        _request: &'a ScanRequest,
    ) -> BoxFuture<'a, Result<RowPage, StorageError>> {
        Box::pin(async { Err(StorageError::Unavailable("connection refused".to_string())) })
    }

    fn get<'a>(
        &'a self,
        _table: &'a str,
        _partition: &'a str,
        _clustering: &'a str,
    ) -> BoxFuture<'a, Result<Option<StoredRow>, StorageError>> {
        Box::pin(async { Err(StorageError::Unavailable("connection refused".to_string())) })
    }

    fn put<'a>(
        &'a self,
        _table: &'a str,
        _row: StoredRow,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async { Err(StorageError::Unavailable("connection refused".to_string())) })
    }
}

pub fn recording() -> Arc<RecordingStore> {
    Arc::new(RecordingStore::default())
}
