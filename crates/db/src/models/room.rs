//! The `rooms` table row and its mapping to the domain [`Room`].
//!
//! Notebooks and presence entries are stored as JSONB inside the row, so
//! the row model carries them as raw `serde_json::Value` and converts at
//! the store boundary. A row that fails conversion is a corrupt document
//! and surfaces as a generic internal error, never a domain error.

use sharepad_core::room::Room;
use sharepad_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow)]
pub struct RoomRecord {
    pub id: String,
    pub created_at: Timestamp,
    pub last_active: Timestamp,
    pub expires_at: Timestamp,
    pub notebooks: serde_json::Value,
    pub users: serde_json::Value,
}

impl RoomRecord {
    /// Serialize a domain room into row form.
    pub fn try_from_room(room: &Room) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: room.id.clone(),
            created_at: room.created_at,
            last_active: room.last_active,
            expires_at: room.expires_at,
            notebooks: serde_json::to_value(&room.notebooks)?,
            users: serde_json::to_value(&room.users)?,
        })
    }

    /// Deserialize a row into the domain room.
    pub fn try_into_room(self) -> Result<Room, serde_json::Error> {
        Ok(Room {
            id: self.id,
            created_at: self.created_at,
            last_active: self.last_active,
            expires_at: self.expires_at,
            notebooks: serde_json::from_value(self.notebooks)?,
            users: serde_json::from_value(self.users)?,
        })
    }
}
