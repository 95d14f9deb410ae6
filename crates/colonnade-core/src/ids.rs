use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

use crate::error::CoreError;

/// Identifier whose natural order is creation order.
///
/// Backed by a UUIDv7: the leading 48 bits hold the Unix time in
/// milliseconds, so byte order (and therefore `Ord` and the encoded
/// clustering key) follows the instant the id was minted. Any other UUID
/// version is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Uuid", into = "Uuid")]
pub struct MessageId(Uuid);

impl MessageId {
    /// Mint an id for the current instant.
    pub fn now() -> Self {
        Self(Uuid::now_v7())
    }

    /// Mint an id for a given instant (millisecond precision).
    ///
    /// Two ids minted for the same millisecond compare in random order.
    pub fn at(instant: jiff::Timestamp) -> Result<Self, CoreError> {
        let millis = u64::try_from(instant.as_millisecond()).map_err(|_| {
            CoreError::InvalidKey(format!("message id cannot encode pre-epoch instant {instant}"))
        })?;
        let nanos = (millis % 1_000) as u32 * 1_000_000;
        let ts = Timestamp::from_unix(NoContext, millis / 1_000, nanos);
        Ok(Self(Uuid::new_v7(ts)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Milliseconds since the Unix epoch embedded in the id.
    pub fn unix_millis(&self) -> u64 {
        let b = self.0.as_bytes();
        u64::from_be_bytes([0, 0, b[0], b[1], b[2], b[3], b[4], b[5]])
    }

    pub fn created_at(&self) -> Result<jiff::Timestamp, CoreError> {
        let millis = i64::try_from(self.unix_millis())
            .map_err(|_| CoreError::InvalidKey(format!("message id {self} out of range")))?;
        jiff::Timestamp::from_millisecond(millis)
            .map_err(|e| CoreError::InvalidKey(format!("message id {self} out of range: {e}")))
    }
}

impl TryFrom<Uuid> for MessageId {
    type Error = CoreError;

    fn try_from(value: Uuid) -> Result<Self, Self::Error> {
        match value.get_version_num() {
            7 => Ok(Self(value)),
            v => Err(CoreError::InvalidKey(format!(
                "message id {value} is UUID version {v}, expected time-ordered version 7"
            ))),
        }
    }
}

impl From<MessageId> for Uuid {
    fn from(id: MessageId) -> Self {
        id.0
    }
}

impl FromStr for MessageId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s)
            .map_err(|e| CoreError::InvalidKey(format!("invalid message id {s:?}: {e}")))?;
        Self::try_from(uuid)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
