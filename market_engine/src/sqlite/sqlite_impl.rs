//! `SqliteDatabase` is the SQLite-backed peer message store.
//!
//! Every operation takes a single store-wide lock, shared by all clones of the handle, before touching the pool. Writes
//! additionally run inside a transaction.
use std::{fmt::Debug, sync::Arc};

use chrono::Utc;
use log::*;
use sqlx::{migrate::MigrateError, SqlitePool};
use tokio::sync::Mutex;

use super::db::{db_url, messages, new_pool};
use crate::{
    db_types::{MessageType, NewMessage, OrderMessage, PeerMessage, StoredMessage},
    traits::{MessageStore, MessageStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
    lock: Arc<Mutex<()>>,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Creates a new store using the URL in `MKT_DATABASE_URL`, or the default.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool, lock: Arc::new(Mutex::new(())) })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date with the embedded migrations.
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Message store migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// The error for a failed write, given the outcome of the rollback that followed it.
fn write_failure(write: sqlx::Error, rollback: Result<(), sqlx::Error>) -> MessageStoreError {
    match rollback {
        Ok(()) => write.into(),
        Err(rollback) => {
            error!("🗃️ Rollback failed as well. {rollback}");
            MessageStoreError::RollbackFailed { write: write.to_string(), rollback: rollback.to_string() }
        },
    }
}

impl MessageStore for SqliteDatabase {
    async fn put_message(&self, message: NewMessage) -> Result<(), MessageStoreError> {
        let payload = serde_json::to_vec(&message.message)?;
        let row = messages::MessageRow {
            message_id: &message.message_id,
            order_id: &message.order_id,
            message_type: message.message_type,
            message: &payload,
            peer_id: &message.peer_id,
            error: &message.error,
            received_at: message.received_at,
            pubkey: &message.pubkey,
            created_at: Utc::now().timestamp(),
        };
        let _guard = self.lock.lock().await;
        let mut tx = self.pool.begin().await?;
        if let Err(write) = messages::upsert_message(&row, &mut tx).await {
            error!("🗃️ Could not save message {}. Rolling back. {write}", message.message_id);
            return Err(write_failure(write, tx.rollback().await));
        }
        tx.commit().await?;
        debug!("🗃️ Message {} for order {} has been saved", message.message_id, message.order_id);
        Ok(())
    }

    async fn message_by_order_and_type(
        &self,
        order_id: &str,
        message_type: MessageType,
    ) -> Result<StoredMessage, MessageStoreError> {
        let _guard = self.lock.lock().await;
        let mut conn = self.pool.acquire().await?;
        let (raw, peer_id, error) = messages::fetch_message_by_order_and_type(order_id, message_type, &mut conn)
            .await?
            .ok_or_else(|| MessageStoreError::NotFound { order_id: order_id.to_string(), message_type })?;
        let message = if raw.is_empty() { PeerMessage::default() } else { serde_json::from_slice(&raw)? };
        Ok(StoredMessage { message, peer_id, error })
    }

    async fn errored_messages(&self) -> Result<Vec<OrderMessage>, MessageStoreError> {
        let _guard = self.lock.lock().await;
        let mut conn = self.pool.acquire().await?;
        let messages = messages::fetch_errored_messages(&mut conn).await?;
        trace!("🗃️ {} errored messages found", messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::prepare_env::{create_database, prepare_test_env, random_db_path};

    #[tokio::test]
    async fn failed_write_is_rolled_back_and_reported() {
        let url = random_db_path();
        create_database(&url).await;
        let db = SqliteDatabase::new_with_url(&url, 1).await.unwrap();
        let err = db.put_message(NewMessage::new("m1", "o1", MessageType::Chat, "QmPeer")).await.unwrap_err();
        assert!(matches!(err, MessageStoreError::Persistence(ref e) if e.contains("no such table")), "{err}");
        // The lock and the connection are released after the failure.
        db.migrate().await.unwrap();
        db.put_message(NewMessage::new("m1", "o1", MessageType::Chat, "QmPeer")).await.unwrap();
        db.close().await;
    }

    #[test]
    fn write_failure_after_clean_rollback() {
        let err = write_failure(sqlx::Error::RowNotFound, Ok(()));
        assert!(matches!(err, MessageStoreError::Persistence(_)));
        assert!(err.to_string().contains(&sqlx::Error::RowNotFound.to_string()));
    }

    #[test]
    fn write_failure_with_failed_rollback_reports_both() {
        let write = sqlx::Error::Protocol("disk I/O error".into());
        let rollback = sqlx::Error::PoolClosed;
        let (write_text, rollback_text) = (write.to_string(), rollback.to_string());
        let err = write_failure(write, Err(rollback));
        match &err {
            MessageStoreError::RollbackFailed { write, rollback } => {
                assert_eq!(write, &write_text);
                assert_eq!(rollback, &rollback_text);
            },
            other => panic!("expected a rollback failure, got {other:?}"),
        }
        assert_eq!(err.to_string(), format!("message put fail: {write_text} and rollback failed: {rollback_text}"));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn clones_share_the_store() {
        let url = random_db_path();
        prepare_test_env(&url).await;
        let db = SqliteDatabase::new_with_url(&url, 2).await.unwrap();
        let other = db.clone();
        assert_eq!(other.url(), url);
        other.put_message(NewMessage::new("m1", "o1", MessageType::Refund, "QmPeer")).await.unwrap();
        let stored = db.message_by_order_and_type("o1", MessageType::Refund).await.unwrap();
        assert_eq!(stored.peer_id, "QmPeer");
        assert!(stored.message.is_empty());
    }
}
