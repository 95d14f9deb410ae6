use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::clustering::{self, ClusteringSpec, ClusteringValue};
use crate::error::CoreError;
use crate::keys::ConversationKey;
use crate::row::Row;

/// A conversation header. One static row per conversation partition.
///
/// `last_message_time` is the only field expected to change after creation;
/// keeping it in step with the `chat_messages` table is the writer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Conversation {
    pub conversation_id: Uuid,
    pub conversation_name: String,
    pub created_at: jiff::Timestamp,
    pub participants: BTreeSet<String>,
    pub last_message_time: Option<jiff::Timestamp>,
}

impl Row for Conversation {
    type Partition = ConversationKey;

    const CLUSTERING: &'static ClusteringSpec = &clustering::CONVERSATIONS;

    fn partition_key(&self) -> Result<ConversationKey, CoreError> {
        ConversationKey::new(self.conversation_id)
    }

    fn clustering_values(&self) -> Vec<ClusteringValue> {
        Vec::new()
    }
}
