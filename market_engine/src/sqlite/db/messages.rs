use log::*;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::{
    db_types::{MessageType, OrderMessage},
    traits::MessageStoreError,
};

/// The row as it will be written. The payload is already serialized.
pub struct MessageRow<'a> {
    pub message_id: &'a str,
    pub order_id: &'a str,
    pub message_type: MessageType,
    pub message: &'a [u8],
    pub peer_id: &'a str,
    pub error: &'a str,
    pub received_at: i64,
    pub pubkey: &'a [u8],
    pub created_at: i64,
}

/// Inserts the row, replacing every column of any existing row with the same `message_id`.
pub async fn upsert_message(row: &MessageRow<'_>, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"INSERT OR REPLACE INTO messages
            (message_id, order_id, message_type, message, peer_id, err, received_at, pubkey, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(row.message_id)
    .bind(row.order_id)
    .bind(row.message_type.code())
    .bind(row.message)
    .bind(row.peer_id)
    .bind(row.error)
    .bind(row.received_at)
    .bind(row.pubkey)
    .bind(row.created_at)
    .execute(conn)
    .await?;
    trace!("🗃️ Message {} ({}) for order {} saved", row.message_id, row.message_type, row.order_id);
    Ok(())
}

/// Returns the raw payload, peer id and error of the most recently written message for the order and type.
pub async fn fetch_message_by_order_and_type(
    order_id: &str,
    message_type: MessageType,
    conn: &mut SqliteConnection,
) -> Result<Option<(Vec<u8>, String, String)>, sqlx::Error> {
    let row = sqlx::query(
        r#"SELECT message, peer_id, err FROM messages WHERE order_id = ? AND message_type = ?
           ORDER BY created_at DESC, rowid DESC LIMIT 1"#,
    )
    .bind(order_id)
    .bind(message_type.code())
    .fetch_optional(conn)
    .await?;
    match row {
        Some(r) => {
            let message = r.try_get::<Option<Vec<u8>>, _>("message")?.unwrap_or_default();
            Ok(Some((message, r.try_get("peer_id")?, r.try_get("err")?)))
        },
        None => Ok(None),
    }
}

/// Fetches every message with a non-empty error. Rows are returned whatever their message type code, including codes
/// this node does not know.
pub async fn fetch_errored_messages(conn: &mut SqliteConnection) -> Result<Vec<OrderMessage>, MessageStoreError> {
    let rows = sqlx::query(
        r#"SELECT message_id, order_id, message_type, message, peer_id, err, pubkey FROM messages
           WHERE err != '' ORDER BY created_at, rowid"#,
    )
    .fetch_all(conn)
    .await?;
    let messages = rows.iter().map(row_to_order_message).collect::<Result<Vec<_>, _>>()?;
    for m in messages.iter().filter(|m| m.known_type().is_err()) {
        warn!("🗃️ Errored message {} has an unknown message type {}", m.message_id, m.message_type);
    }
    Ok(messages)
}

fn row_to_order_message(row: &SqliteRow) -> Result<OrderMessage, sqlx::Error> {
    Ok(OrderMessage {
        message_id: row.try_get("message_id")?,
        order_id: row.try_get("order_id")?,
        message_type: row.try_get("message_type")?,
        message: row.try_get::<Option<Vec<u8>>, _>("message")?.unwrap_or_default(),
        peer_id: row.try_get("peer_id")?,
        error: row.try_get("err")?,
        pubkey: row.try_get::<Option<Vec<u8>>, _>("pubkey")?.unwrap_or_default(),
    })
}
