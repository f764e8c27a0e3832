use thiserror::Error;

use crate::db_types::{MessageType, MessageTypeConversionError, NewMessage, OrderMessage, StoredMessage};

#[derive(Debug, Error)]
pub enum MessageStoreError {
    #[error("Message store persistence error: {0}")]
    Persistence(String),
    #[error("message put fail: {write} and rollback failed: {rollback}")]
    RollbackFailed { write: String, rollback: String },
    #[error("No {message_type} message found for order {order_id}")]
    NotFound { order_id: String, message_type: MessageType },
    #[error("Could not (de)serialize message payload: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Stored message has an invalid message type: {0}")]
    InvalidMessageType(i32),
}

impl MessageStoreError {
    /// A missing row is an ordinary outcome when probing for a message, not a storage failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MessageStoreError::NotFound { .. })
    }
}

impl From<MessageTypeConversionError> for MessageStoreError {
    fn from(e: MessageTypeConversionError) -> Self {
        MessageStoreError::InvalidMessageType(e.0)
    }
}

impl From<sqlx::Error> for MessageStoreError {
    fn from(e: sqlx::Error) -> Self {
        MessageStoreError::Persistence(e.to_string())
    }
}

/// Durable, idempotent storage of inter-peer protocol messages.
///
/// Every operation is serialized against every other operation on the same store. Writes are atomic.
#[allow(async_fn_in_trait)]
pub trait MessageStore {
    /// Inserts the message, or fully replaces the existing row with the same `message_id`. The row is stamped with
    /// the server's write time.
    async fn put_message(&self, message: NewMessage) -> Result<(), MessageStoreError>;

    /// Fetches the message for the given order and message type. Returns [`MessageStoreError::NotFound`] if there
    /// is no such message.
    async fn message_by_order_and_type(
        &self,
        order_id: &str,
        message_type: MessageType,
    ) -> Result<StoredMessage, MessageStoreError>;

    /// Fetches every message with a non-empty delivery error, across all orders and types, including rows whose
    /// message type code is unknown to this node. The rows are left untouched; clearing the error is done by writing
    /// the message again.
    async fn errored_messages(&self) -> Result<Vec<OrderMessage>, MessageStoreError>;
}
