use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::clustering::{self, ClusteringSpec, ClusteringValue};
use crate::error::CoreError;
use crate::ids::MessageId;
use crate::keys::ConversationKey;
use crate::row::Row;

/// A chat message, partitioned by conversation and clustered by
/// `message_id` descending (newest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Message {
    pub conversation_id: Uuid,
    #[ts(type = "string")]
    pub message_id: MessageId,
    pub sender_id: String,
    pub sender_name: String,
    pub message_text: String,
    pub created_at: jiff::Timestamp,
    pub is_read: bool,
}

impl Row for Message {
    type Partition = ConversationKey;

    const CLUSTERING: &'static ClusteringSpec = &clustering::CHAT_MESSAGES;

    fn partition_key(&self) -> Result<ConversationKey, CoreError> {
        ConversationKey::new(self.conversation_id)
    }

    fn clustering_values(&self) -> Vec<ClusteringValue> {
        vec![ClusteringValue::Uuid(self.message_id.as_uuid().as_u128())]
    }

    /// The id must carry the same millisecond as `created_at`, otherwise
    /// clustering order and chronological order drift apart.
    fn validate(&self) -> Result<(), CoreError> {
        let id_millis = self.message_id.unix_millis();
        let created_millis = self.created_at.as_millisecond();
        if i64::try_from(id_millis).ok() != Some(created_millis) {
            return Err(CoreError::InvalidKey(format!(
                "message id {} encodes {id_millis}ms but created_at is {created_millis}ms",
                self.message_id
            )));
        }
        Ok(())
    }
}
