use std::sync::Arc;

use colonnade_core::keys::ConversationKey;
use colonnade_core::models::conversation::Conversation;
use colonnade_core::models::message::Message;
use colonnade_core::predicate::Limit;
use uuid::Uuid;

use crate::engine::WideColumnStore;
use crate::error::QueryError;
use crate::query::{RangeQueryEngine, RowCursor};

/// Conversations and their messages.
#[derive(Clone)]
pub struct ConversationStore {
    conversations: RangeQueryEngine<Conversation>,
    messages: RangeQueryEngine<Message>,
}

impl ConversationStore {
    pub fn new(store: Arc<dyn WideColumnStore>, page_size: usize) -> Self {
        Self {
            conversations: RangeQueryEngine::new(Arc::clone(&store), page_size),
            messages: RangeQueryEngine::new(store, page_size),
        }
    }

    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, QueryError> {
        self.conversations.scan_table().collect().await
    }

    /// `None` when no conversation has this id. The nil uuid never does.
    pub async fn get_conversation(&self, id: Uuid) -> Result<Option<Conversation>, QueryError> {
        let Ok(key) = ConversationKey::new(id) else {
            return Ok(None);
        };
        self.conversations.get(&key, &[]).await
    }

    /// Like [`Self::get_conversation`], but absence is `NotFound`.
    pub async fn require_conversation(&self, id: Uuid) -> Result<Conversation, QueryError> {
        self.get_conversation(id)
            .await?
            .ok_or_else(|| QueryError::NotFound {
                entity: "conversation",
                id: id.to_string(),
            })
    }

    /// Every message of a conversation, newest first.
    pub async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, QueryError> {
        self.message_cursor(conversation_id)?.collect().await
    }

    /// Streaming form of [`Self::list_messages`].
    pub fn message_cursor(&self, conversation_id: Uuid) -> Result<RowCursor<Message>, QueryError> {
        let key = ConversationKey::new(conversation_id)?;
        Ok(self.messages.scan_all(&key))
    }

    /// The `limit` most recent messages, newest first.
    pub async fn latest_messages(
        &self,
        conversation_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Message>, QueryError> {
        let key = ConversationKey::new(conversation_id)?;
        let limit = Limit::new(limit)?;
        self.messages.scan_bounded(&key, limit).collect().await
    }

    pub async fn put_conversation(&self, conversation: &Conversation) -> Result<(), QueryError> {
        self.conversations.append(conversation).await
    }

    /// Append a message. Does not touch the conversation's
    /// `last_message_time`.
    pub async fn append_message(&self, message: &Message) -> Result<(), QueryError> {
        self.messages.append(message).await
    }
}
