//! Integration tests for the room reconciliation protocol.
//!
//! Exercises the full repository layer against the in-memory store:
//! - Room creation and the default notebook
//! - Lazy expiry reaping
//! - Presence upsert, pruning, and read-vs-write persistence
//! - Notebook publish/add/delete rules
//! - The end-to-end create/add/publish/delete scenario

use assert_matches::assert_matches;
use chrono::{Duration, Utc};

use sharepad_core::error::CoreError;
use sharepad_core::palette;
use sharepad_core::presence::USER_INACTIVITY_TIMEOUT_MS;
use sharepad_core::room::{Room, UserPresence, MAIN_NOTEBOOK_ID, MAIN_NOTEBOOK_NAME};
use sharepad_db::repositories::{RoomOpError, RoomRepo};
use sharepad_db::store::{MemoryRoomStore, RoomStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_room(store: &MemoryRoomStore) -> Room {
    RoomRepo::create_room(store, "creator", "Creator")
        .await
        .expect("room creation")
}

/// Write a presence entry with an arbitrary `lastSeen` straight into the
/// stored document, bypassing the repository.
async fn seed_user(store: &MemoryRoomStore, room_id: &str, user_id: &str, last_seen: i64) {
    let mut room = store.get(room_id).await.unwrap().unwrap();
    room.users.push(UserPresence {
        id: user_id.to_string(),
        username: user_id.to_string(),
        last_seen,
    });
    store.put(&room).await.unwrap();
}

// ---------------------------------------------------------------------------
// Room creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_get_returns_default_main_notebook() {
    let store = MemoryRoomStore::new();
    let created = create_room(&store).await;

    let room = RoomRepo::get_room(&store, &created.id).await.unwrap();
    assert_eq!(room.notebooks.len(), 1);
    assert_eq!(room.notebooks[0].id, MAIN_NOTEBOOK_ID);
    assert_eq!(room.notebooks[0].name, MAIN_NOTEBOOK_NAME);
    assert_eq!(room.notebooks[0].content, "");
    assert_eq!(room.notebooks[0].color, palette::notebook_color(0));
}

#[tokio::test]
async fn create_allocates_short_alphanumeric_id_and_seeds_creator() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    assert_eq!(room.id.len(), 4);
    assert!(room.id.chars().all(|c| c.is_ascii_alphanumeric()));

    assert_eq!(room.users.len(), 1);
    assert_eq!(room.users[0].id, "creator");
    assert_eq!(room.users[0].username, "Creator");
}

#[tokio::test]
async fn created_room_expires_24_hours_out() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;
    assert_eq!(room.expires_at - room.created_at, Duration::hours(24));
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn expired_room_is_reaped_and_stays_gone() {
    let store = MemoryRoomStore::new();
    let room = Room::new("dead".to_string(), Utc::now() - Duration::hours(25));
    store.put(&room).await.unwrap();

    let err = RoomRepo::get_room(&store, "dead").await.unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::RoomNotFound(_)));

    // The document was deleted, not archived.
    assert!(store.get("dead").await.unwrap().is_none());

    // A second read still reports not-found; nothing resurrects.
    let err = RoomRepo::get_room(&store, "dead").await.unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::RoomNotFound(_)));
}

#[tokio::test]
async fn mutations_on_expired_room_are_rejected() {
    let store = MemoryRoomStore::new();
    let room = Room::new("dead".to_string(), Utc::now() - Duration::hours(25));
    store.put(&room).await.unwrap();

    let err = RoomRepo::heartbeat(&store, "dead", "u1", "Alice")
        .await
        .unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::RoomNotFound(_)));
    assert!(store.get("dead").await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_room_is_not_found() {
    let store = MemoryRoomStore::new();
    let err = RoomRepo::get_room(&store, "none").await.unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::RoomNotFound(_)));
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn heartbeat_is_idempotent_per_user() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let first = RoomRepo::heartbeat(&store, &room.id, "u1", "Alice")
        .await
        .unwrap();
    let second = RoomRepo::heartbeat(&store, &room.id, "u1", "Alice")
        .await
        .unwrap();

    let entries: Vec<_> = second.users.iter().filter(|u| u.id == "u1").collect();
    assert_eq!(entries.len(), 1);

    let first_seen = first.users.iter().find(|u| u.id == "u1").unwrap().last_seen;
    assert!(entries[0].last_seen >= first_seen);
}

#[tokio::test]
async fn heartbeat_updates_username() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    RoomRepo::heartbeat(&store, &room.id, "u1", "Alice")
        .await
        .unwrap();
    let updated = RoomRepo::heartbeat(&store, &room.id, "u1", "Alicia")
        .await
        .unwrap();

    let user = updated.users.iter().find(|u| u.id == "u1").unwrap();
    assert_eq!(user.username, "Alicia");
}

#[tokio::test]
async fn stale_presence_is_hidden_from_reads_but_not_rewritten() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;
    let stale_seen = Utc::now().timestamp_millis() - USER_INACTIVITY_TIMEOUT_MS - 1;
    seed_user(&store, &room.id, "ghost", stale_seen).await;

    let view = RoomRepo::get_room(&store, &room.id).await.unwrap();
    assert!(view.users.iter().all(|u| u.id != "ghost"));

    // A pure read does not persist the pruned set.
    let stored = store.get(&room.id).await.unwrap().unwrap();
    assert!(stored.users.iter().any(|u| u.id == "ghost"));
}

#[tokio::test]
async fn write_path_evicts_stale_presence_from_the_store() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;
    let stale_seen = Utc::now().timestamp_millis() - USER_INACTIVITY_TIMEOUT_MS - 1;
    seed_user(&store, &room.id, "ghost", stale_seen).await;

    RoomRepo::heartbeat(&store, &room.id, "u1", "Alice")
        .await
        .unwrap();

    let stored = store.get(&room.id).await.unwrap().unwrap();
    assert!(stored.users.iter().all(|u| u.id != "ghost"));
    assert!(stored.users.iter().any(|u| u.id == "u1"));
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_round_trips_through_get() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    RoomRepo::publish_content(&store, &room.id, MAIN_NOTEBOOK_ID, "hello".into(), "u1", "Alice")
        .await
        .unwrap();

    let fetched = RoomRepo::get_room(&store, &room.id).await.unwrap();
    assert_eq!(fetched.notebooks[0].id, MAIN_NOTEBOOK_ID);
    assert_eq!(fetched.notebooks[0].content, "hello");
}

#[tokio::test]
async fn publish_records_publisher_presence() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let updated =
        RoomRepo::publish_content(&store, &room.id, MAIN_NOTEBOOK_ID, "x".into(), "u1", "Alice")
            .await
            .unwrap();
    assert!(updated.users.iter().any(|u| u.id == "u1"));
}

#[tokio::test]
async fn publish_to_unknown_notebook_fails_and_drops_content() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let err = RoomRepo::publish_content(&store, &room.id, "nope", "lost".into(), "u1", "Alice")
        .await
        .unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::NotebookNotFound(_)));

    // Nothing was persisted, including the publisher's presence.
    let stored = store.get(&room.id).await.unwrap().unwrap();
    assert_eq!(stored.notebooks[0].content, "");
    assert!(stored.users.iter().all(|u| u.id != "u1"));
}

#[tokio::test]
async fn concurrent_publishers_last_write_wins() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    RoomRepo::publish_content(&store, &room.id, MAIN_NOTEBOOK_ID, "first".into(), "u1", "Alice")
        .await
        .unwrap();
    RoomRepo::publish_content(&store, &room.id, MAIN_NOTEBOOK_ID, "second".into(), "u2", "Bob")
        .await
        .unwrap();

    let fetched = RoomRepo::get_room(&store, &room.id).await.unwrap();
    assert_eq!(fetched.notebooks[0].content, "second");
}

// ---------------------------------------------------------------------------
// Add / delete notebooks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn added_notebooks_cycle_palette_colors_by_creation_order() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let after_one = RoomRepo::add_notebook(&store, &room.id, "One", "u1", "Alice")
        .await
        .unwrap();
    let after_two = RoomRepo::add_notebook(&store, &room.id, "Two", "u1", "Alice")
        .await
        .unwrap();

    assert_eq!(after_one.notebooks[1].color, palette::notebook_color(1));
    assert_eq!(after_two.notebooks[2].color, palette::notebook_color(2));
    assert_eq!(after_two.notebooks[1].id.len(), 8);
}

#[tokio::test]
async fn duplicate_notebook_name_is_rejected() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    RoomRepo::add_notebook(&store, &room.id, "Notes", "u1", "Alice")
        .await
        .unwrap();
    let err = RoomRepo::add_notebook(&store, &room.id, " Notes ", "u1", "Alice")
        .await
        .unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::NotebookNameExists(_)));

    let stored = store.get(&room.id).await.unwrap().unwrap();
    assert_eq!(stored.notebooks.len(), 2);
}

#[tokio::test]
async fn deleting_the_last_notebook_is_rejected_and_room_unchanged() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;
    let before = store.get(&room.id).await.unwrap().unwrap();

    let err = RoomRepo::delete_notebook(&store, &room.id, MAIN_NOTEBOOK_ID, "u1", "Alice")
        .await
        .unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::CannotDeleteLastNotebook));

    // The validation read was not written back.
    let after = store.get(&room.id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn deleting_an_unknown_notebook_is_rejected() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;
    RoomRepo::add_notebook(&store, &room.id, "Notes", "u1", "Alice")
        .await
        .unwrap();

    let err = RoomRepo::delete_notebook(&store, &room.id, "nope", "u1", "Alice")
        .await
        .unwrap_err();
    assert_matches!(err, RoomOpError::Core(CoreError::NotebookNotFound(_)));
}

// ---------------------------------------------------------------------------
// Activity refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mutations_refresh_last_active_but_never_expiry() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let updated = RoomRepo::heartbeat(&store, &room.id, "u1", "Alice")
        .await
        .unwrap();
    assert!(updated.last_active >= room.last_active);
    // Absolute TTL: activity does not slide the expiry forward.
    assert_eq!(updated.expires_at, room.expires_at);
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_add_publish_delete_scenario() {
    let store = MemoryRoomStore::new();
    let room = create_room(&store).await;

    let with_notes = RoomRepo::add_notebook(&store, &room.id, "Notes", "u1", "Alice")
        .await
        .unwrap();
    let notes_id = with_notes
        .notebooks
        .iter()
        .find(|n| n.name == "Notes")
        .unwrap()
        .id
        .clone();

    RoomRepo::publish_content(&store, &room.id, &notes_id, "draft".into(), "u1", "Alice")
        .await
        .unwrap();
    RoomRepo::delete_notebook(&store, &room.id, MAIN_NOTEBOOK_ID, "u1", "Alice")
        .await
        .unwrap();

    let room = RoomRepo::get_room(&store, &room.id).await.unwrap();
    assert_eq!(room.notebooks.len(), 1);
    assert_eq!(room.notebooks[0].name, "Notes");
    assert_eq!(room.notebooks[0].content, "draft");
}
