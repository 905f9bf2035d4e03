//! The document-store contract and its implementations.
//!
//! The core issues exactly one `get` per read/validate step and at most
//! one `put` or `delete` per mutating call. There is no compare-and-swap:
//! concurrent writers to the same room race at document granularity and
//! the last write wins. A row-versioned implementation could slot in
//! behind this trait without touching the repository layer.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use sharepad_core::room::Room;

use crate::models::room::RoomRecord;
use crate::DbPool;

/// Store-level failures, kept distinct from the domain taxonomy.
///
/// `Unavailable` is the transient back-off-and-retry class; the rest
/// surface as generic internal errors at the gateway.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store is overloaded or unreachable; callers should back off.
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    /// A non-transient database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A stored room document failed to deserialize.
    #[error("Corrupt room document: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Single-document access to rooms, keyed by room id.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Fetch a room document, `None` if absent.
    async fn get(&self, room_id: &str) -> Result<Option<Room>, StoreError>;

    /// Insert or replace the room document whole.
    async fn put(&self, room: &Room) -> Result<(), StoreError>;

    /// Remove a room document. Deleting an absent id is not an error.
    async fn delete(&self, room_id: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL implementation
// ---------------------------------------------------------------------------

/// Column list for `rooms` queries.
const COLUMNS: &str = "id, created_at, last_active, expires_at, notebooks, users";

/// Room storage backed by a single PostgreSQL table.
pub struct PgRoomStore {
    pool: DbPool,
}

impl PgRoomStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn get(&self, room_id: &str) -> Result<Option<Room>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        let record = sqlx::query_as::<_, RoomRecord>(&query)
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        record.map(RoomRecord::try_into_room).transpose().map_err(Into::into)
    }

    async fn put(&self, room: &Room) -> Result<(), StoreError> {
        let record = RoomRecord::try_from_room(room)?;
        sqlx::query(
            "INSERT INTO rooms \
                 (id, created_at, last_active, expires_at, notebooks, users) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 last_active = $3, \
                 expires_at = $4, \
                 notebooks = $5, \
                 users = $6",
        )
        .bind(&record.id)
        .bind(record.created_at)
        .bind(record.last_active)
        .bind(record.expires_at)
        .bind(&record.notebooks)
        .bind(&record.users)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx_error)?;
        Ok(())
    }

    async fn delete(&self, room_id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(())
    }
}

/// Classify a sqlx error into the store taxonomy.
///
/// Pool exhaustion and closed-pool errors are the transient class; the
/// rest are non-transient database failures.
fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Database(other),
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Room storage in a process-local map.
///
/// Used by tests and local development. The handle is passed in
/// explicitly wherever a store is needed, never held in module-level
/// globals, which is what makes the read-modify-write behaviour of the
/// repository observable from tests.
#[derive(Default)]
pub struct MemoryRoomStore {
    rooms: RwLock<HashMap<String, Room>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn get(&self, room_id: &str) -> Result<Option<Room>, StoreError> {
        Ok(self.rooms.read().await.get(room_id).cloned())
    }

    async fn put(&self, room: &Room) -> Result<(), StoreError> {
        self.rooms
            .write()
            .await
            .insert(room.id.clone(), room.clone());
        Ok(())
    }

    async fn delete(&self, room_id: &str) -> Result<(), StoreError> {
        self.rooms.write().await.remove(room_id);
        Ok(())
    }
}
