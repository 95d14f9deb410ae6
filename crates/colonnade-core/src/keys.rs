//! Partition key conventions.
//!
//! A partition key selects one physical partition of a table by exact match.
//! Keys are validated when they are built so a malformed key never reaches a
//! storage engine.

use std::fmt;

use uuid::Uuid;

use crate::error::CoreError;

/// Table names, shared by every engine.
pub mod table {
    pub const CONVERSATIONS: &str = "conversations";
    pub const CHAT_MESSAGES: &str = "chat_messages";
    pub const SENSOR_METRICS: &str = "sensor_metrics";
}

pub const MAX_SENSOR_ID_LEN: usize = 128;

/// A validated partition key.
pub trait PartitionKey: Send + Sync {
    /// Canonical text form. Unique per partition within a table, and never
    /// contains characters outside `[A-Za-z0-9._/-]`.
    fn encode(&self) -> String;
}

/// One partition per conversation. Used by both the `conversations` and the
/// `chat_messages` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey(Uuid);

impl ConversationKey {
    pub fn new(conversation_id: Uuid) -> Result<Self, CoreError> {
        if conversation_id.is_nil() {
            return Err(CoreError::InvalidKey(
                "conversation id is missing (nil uuid)".to_string(),
            ));
        }
        Ok(Self(conversation_id))
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let id = Uuid::parse_str(s)
            .map_err(|e| CoreError::InvalidKey(format!("invalid conversation id {s:?}: {e}")))?;
        Self::new(id)
    }

    pub fn conversation_id(&self) -> Uuid {
        self.0
    }
}

impl PartitionKey for ConversationKey {
    fn encode(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One partition per sensor per calendar month.
///
/// The month bound caps a partition at one sensor's readings for one month,
/// which keeps partitions wide but never unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricPartitionKey {
    sensor_id: String,
    year: i16,
    month: i8,
}

impl MetricPartitionKey {
    pub fn new(sensor_id: &str, year: i32, month: i32) -> Result<Self, CoreError> {
        validate_sensor_id(sensor_id)?;
        let year = i16::try_from(year)
            .ok()
            .filter(|y| (1..=9999).contains(y))
            .ok_or_else(|| CoreError::InvalidKey(format!("year {year} outside 1..=9999")))?;
        let month = i8::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| CoreError::InvalidKey(format!("month {month} outside 1..=12")))?;
        Ok(Self {
            sensor_id: sensor_id.to_string(),
            year,
            month,
        })
    }

    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    pub fn year(&self) -> i16 {
        self.year
    }

    pub fn month(&self) -> i8 {
        self.month
    }
}

impl PartitionKey for MetricPartitionKey {
    fn encode(&self) -> String {
        format!("{}/{:04}/{:02}", self.sensor_id, self.year, self.month)
    }
}

impl fmt::Display for MetricPartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn validate_sensor_id(sensor_id: &str) -> Result<(), CoreError> {
    if sensor_id.is_empty() {
        return Err(CoreError::InvalidKey("sensor id is missing".to_string()));
    }
    if sensor_id.len() > MAX_SENSOR_ID_LEN {
        return Err(CoreError::InvalidKey(format!(
            "sensor id longer than {MAX_SENSOR_ID_LEN} bytes"
        )));
    }
    if let Some(c) = sensor_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(CoreError::InvalidKey(format!(
            "sensor id {sensor_id:?} contains unsupported character {c:?}"
        )));
    }
    Ok(())
}
