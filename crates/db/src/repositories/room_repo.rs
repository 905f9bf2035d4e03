//! The room reconciliation protocol.
//!
//! Every mutating operation is one read-modify-write cycle: fetch the room
//! with the liveness check, apply the domain transformation, refresh and
//! prune presence, stamp `last_active`, write the document back whole, and
//! return it so callers can reconcile against the authoritative copy
//! without an immediate re-fetch.
//!
//! There is no optimistic locking between the read and the write;
//! concurrent writers to the same room race and the last persisted
//! document wins. The trade-off is deliberate: the store contract is
//! single-row get/put/delete. Moving to row versioning belongs in the
//! store implementations, not here.

use chrono::Utc;

use sharepad_core::error::CoreError;
use sharepad_core::room::Room;
use sharepad_core::{ident, notebook, presence};

use crate::store::{RoomStore, StoreError};

/// Failures from room operations: the domain taxonomy plus store-level
/// trouble.
#[derive(Debug, thiserror::Error)]
pub enum RoomOpError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Room lifecycle and reconciliation operations.
pub struct RoomRepo;

impl RoomRepo {
    /// Create a room under a freshly allocated short id, seeded with the
    /// creating user's presence.
    ///
    /// Candidate ids are retried against the store up to
    /// [`ident::MAX_ROOM_ID_ATTEMPTS`] times before giving up with
    /// `RoomCreationFailed`.
    pub async fn create_room(
        store: &dyn RoomStore,
        user_id: &str,
        username: &str,
    ) -> Result<Room, RoomOpError> {
        let mut attempts = 0;
        let id = loop {
            let candidate = ident::generate(ident::ROOM_ID_LEN);
            if store.get(&candidate).await?.is_none() {
                break candidate;
            }
            attempts += 1;
            if attempts >= ident::MAX_ROOM_ID_ATTEMPTS {
                return Err(CoreError::RoomCreationFailed { attempts }.into());
            }
            tracing::debug!(candidate = %candidate, attempts, "Room id collision, retrying");
        };

        let now = Utc::now();
        let mut room = Room::new(id, now);
        presence::touch(&mut room.users, user_id, username, now.timestamp_millis());
        store.put(&room).await?;
        Ok(room)
    }

    /// Fetch a room, enforcing liveness.
    ///
    /// An absent room is `RoomNotFound`. An expired room is deleted from
    /// the store on the spot and then surfaced as `RoomNotFound` as well;
    /// callers cannot distinguish the two, and expired rooms are never
    /// resurrected. Missing notebook colors are back-filled by ordinal.
    ///
    /// The presence set is returned as stored; callers on the read path
    /// filter their view via [`presence::active`], callers on the write
    /// path prune through [`presence::touch`] before persisting.
    pub async fn fetch_live(store: &dyn RoomStore, room_id: &str) -> Result<Room, RoomOpError> {
        let Some(mut room) = store.get(room_id).await? else {
            return Err(CoreError::RoomNotFound(room_id.to_string()).into());
        };

        if room.is_expired(Utc::now()) {
            store.delete(room_id).await?;
            tracing::debug!(room_id = %room_id, "Reaped expired room");
            return Err(CoreError::RoomNotFound(room_id.to_string()).into());
        }

        room.fill_missing_colors();
        Ok(room)
    }

    /// Read a room for polling clients.
    ///
    /// Pure read: stale presence entries are filtered from the returned
    /// view but the stored document is not rewritten. Eviction of the
    /// durable set happens on the next write path.
    pub async fn get_room(store: &dyn RoomStore, room_id: &str) -> Result<Room, RoomOpError> {
        let mut room = Self::fetch_live(store, room_id).await?;
        room.users = presence::active(&room.users, Utc::now().timestamp_millis());
        Ok(room)
    }

    /// Replace a notebook's content (last-write-wins) and record the
    /// publisher's presence.
    ///
    /// An unknown notebook id fails the whole operation; nothing is
    /// persisted and the submitted content is dropped.
    pub async fn publish_content(
        store: &dyn RoomStore,
        room_id: &str,
        notebook_id: &str,
        content: String,
        user_id: &str,
        username: &str,
    ) -> Result<Room, RoomOpError> {
        let mut room = Self::fetch_live(store, room_id).await?;
        let now = Utc::now();

        notebook::publish_content(&mut room.notebooks, notebook_id, content, now.timestamp_millis())?;
        presence::touch(&mut room.users, user_id, username, now.timestamp_millis());
        room.last_active = now;

        store.put(&room).await?;
        Ok(room)
    }

    /// Append a notebook with a freshly generated id and the next palette
    /// color.
    ///
    /// Notebook ids are long enough that per-room collisions are not
    /// re-checked. A trimmed duplicate name among siblings is rejected.
    pub async fn add_notebook(
        store: &dyn RoomStore,
        room_id: &str,
        name: &str,
        user_id: &str,
        username: &str,
    ) -> Result<Room, RoomOpError> {
        let mut room = Self::fetch_live(store, room_id).await?;
        let now = Utc::now();

        let notebook_id = ident::generate(ident::NOTEBOOK_ID_LEN);
        notebook::add_notebook(&mut room.notebooks, notebook_id, name, now.timestamp_millis())?;
        presence::touch(&mut room.users, user_id, username, now.timestamp_millis());
        room.last_active = now;

        store.put(&room).await?;
        Ok(room)
    }

    /// Remove a notebook.
    ///
    /// Deleting the last notebook is rejected and the validation read is
    /// not written back; the room stays exactly as stored.
    pub async fn delete_notebook(
        store: &dyn RoomStore,
        room_id: &str,
        notebook_id: &str,
        user_id: &str,
        username: &str,
    ) -> Result<Room, RoomOpError> {
        let mut room = Self::fetch_live(store, room_id).await?;
        let now = Utc::now();

        notebook::delete_notebook(&mut room.notebooks, notebook_id)?;
        presence::touch(&mut room.users, user_id, username, now.timestamp_millis());
        room.last_active = now;

        store.put(&room).await?;
        Ok(room)
    }

    /// Record presence without touching notebook content.
    pub async fn heartbeat(
        store: &dyn RoomStore,
        room_id: &str,
        user_id: &str,
        username: &str,
    ) -> Result<Room, RoomOpError> {
        let mut room = Self::fetch_live(store, room_id).await?;
        let now = Utc::now();

        presence::touch(&mut room.users, user_id, username, now.timestamp_millis());
        room.last_active = now;

        store.put(&room).await?;
        Ok(room)
    }
}
