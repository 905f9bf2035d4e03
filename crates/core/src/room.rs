//! Room, notebook, and presence data types plus room lifecycle rules.
//!
//! A room is one document: identity, lifecycle timestamps, an ordered
//! notebook list (insertion order drives default color assignment and the
//! last-notebook check), and a presence set. The store persists rooms
//! whole; every mutation is a read-modify-write over this struct.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::palette;
use crate::types::{Timestamp, UnixMillis};

// ---------------------------------------------------------------------------
// Lifecycle constants
// ---------------------------------------------------------------------------

/// Rooms live this long from creation. The TTL is absolute: activity
/// refreshes `last_active` but never slides `expires_at`.
pub const ROOM_TTL_HOURS: i64 = 24;

/// Reserved id of the notebook every room starts with.
pub const MAIN_NOTEBOOK_ID: &str = "main";

/// Display name of the default notebook.
pub const MAIN_NOTEBOOK_NAME: &str = "Main Notebook";

// ---------------------------------------------------------------------------
// Document types
// ---------------------------------------------------------------------------

/// A named text buffer within a room.
///
/// `color` may be absent in documents written before color assignment
/// existed; readers back-fill it from the notebook's ordinal position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: String,
    pub name: String,
    pub content: String,
    pub last_update: UnixMillis,
    #[serde(default)]
    pub color: String,
}

/// A user's liveness record within a room.
///
/// The id is a client-generated opaque token with no cryptographic
/// guarantee; the service has no auth goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPresence {
    pub id: String,
    pub username: String,
    pub last_seen: UnixMillis,
}

/// The full room document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub created_at: Timestamp,
    pub last_active: Timestamp,
    pub expires_at: Timestamp,
    pub notebooks: Vec<Notebook>,
    pub users: Vec<UserPresence>,
}

impl Room {
    /// A fresh room: one `"main"` notebook with empty content and the
    /// first palette color, no presence entries, expiry fixed at
    /// `now + 24h`.
    pub fn new(id: String, now: Timestamp) -> Self {
        let main = Notebook {
            id: MAIN_NOTEBOOK_ID.to_string(),
            name: MAIN_NOTEBOOK_NAME.to_string(),
            content: String::new(),
            last_update: now.timestamp_millis(),
            color: palette::notebook_color(0).to_string(),
        };
        Self {
            id,
            created_at: now,
            last_active: now,
            expires_at: now + Duration::hours(ROOM_TTL_HOURS),
            notebooks: vec![main],
            users: Vec::new(),
        }
    }

    /// Whether the room has reached its expiry instant.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Assign a palette color, by ordinal position, to any notebook that
    /// has none.
    pub fn fill_missing_colors(&mut self) {
        for (index, notebook) in self.notebooks.iter_mut().enumerate() {
            if notebook.color.is_empty() {
                notebook.color = palette::notebook_color(index).to_string();
            }
        }
    }
}
