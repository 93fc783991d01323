//! SQLite Message Repository 実装
//!
//! `messages` テーブルを追記専用ログとして使用します。
//! `seq` は挿入順を表し、同一タイムスタンプの並び順を決めます。

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    FromRow,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};

use crate::domain::{
    AuthorName, MessageContent, MessageId, MessageIdFactory, MessageRepository, NewMessage,
    RepositoryError, RoomId, StoredMessage, Timestamp, UserId,
};

const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,
    id         TEXT    NOT NULL UNIQUE,
    room       TEXT    NOT NULL,
    user_id    TEXT,
    user_name  TEXT    NOT NULL,
    message    TEXT    NOT NULL,
    created_at INTEGER NOT NULL
)
"#;

const CREATE_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_messages_room_created ON messages (room, created_at, seq)";

/// Database row type for stored messages.
#[derive(Debug, FromRow)]
struct MessageRow {
    id: String,
    room: String,
    user_id: Option<String>,
    user_name: String,
    message: String,
    created_at: i64,
}

/// Rows are taken as persisted; validation happens before `append`.
impl From<MessageRow> for StoredMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: MessageId::from_stored(row.id),
            room: RoomId::from_stored(row.room),
            author: AuthorName::from_stored(row.user_name),
            author_id: UserId::optional(row.user_id),
            content: MessageContent::from_stored(row.message),
            created_at: Timestamp::new(row.created_at),
        }
    }
}

fn map_sqlx_error(error: sqlx::Error) -> RepositoryError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable(error.to_string())
        }
        other => RepositoryError::Query(other.to_string()),
    }
}

/// SQLite-backed message store
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Connect to `database_url` (creating the file if needed) and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self { pool };
        repository.migrate().await?;
        tracing::info!("Message store ready at {}", database_url);
        Ok(repository)
    }

    /// Open a private in-memory database for testing.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that never expires.
    pub async fn in_memory() -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self { pool };
        repository.migrate().await?;
        Ok(repository)
    }

    /// Create the `messages` table and its index if they do not exist.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_MESSAGES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query(CREATE_ROOM_INDEX)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, message: NewMessage) -> Result<StoredMessage, RepositoryError> {
        let id = MessageIdFactory::generate();
        let created_at = message.created_at.unwrap_or_else(Timestamp::now);

        sqlx::query(
            "INSERT INTO messages (id, room, user_id, user_name, message, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.as_str())
        .bind(message.room.as_str())
        .bind(message.author_id.as_ref().map(|u| u.as_str()))
        .bind(message.author.as_str())
        .bind(message.content.as_str())
        .bind(created_at.value())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(StoredMessage::from_new(id, message, created_at))
    }

    async fn list_by_room(&self, room: &RoomId) -> Result<Vec<StoredMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            "SELECT id, room, user_id, user_name, message, created_at \
             FROM messages WHERE room = ? ORDER BY created_at ASC, seq ASC",
        )
        .bind(room.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(StoredMessage::from).collect())
    }

    async fn delete_by_room(&self, room: &RoomId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM messages WHERE room = ?")
            .bind(room.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected())
    }
}
