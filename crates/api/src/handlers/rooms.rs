//! Handlers for the room reconciliation gateway.
//!
//! Each operation validates its boundary inputs, runs one repository
//! call, and returns the authoritative room state from that same call so
//! polling clients reconcile without an immediate re-fetch. Errors are
//! recovered into structured JSON at this boundary; nothing propagates
//! past a handler.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::{Deserialize, Serialize};

use sharepad_core::room::{Notebook, Room, UserPresence};
use sharepad_core::types::Timestamp;
use sharepad_core::username;
use sharepad_db::repositories::RoomRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub username: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishContentRequest {
    pub notebook_id: String,
    pub content: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNotebookRequest {
    pub name: String,
    pub user_id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRequest {
    pub user_id: String,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
}

/// Full room view: notebooks, active users, and the (fixed) expiry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub notebooks: Vec<Notebook>,
    pub users: Vec<UserPresence>,
    pub expires_at: Timestamp,
}

impl From<Room> for RoomView {
    fn from(room: Room) -> Self {
        Self {
            notebooks: room.notebooks,
            users: room.users,
            expires_at: room.expires_at,
        }
    }
}

/// Notebook-list view returned by add/delete.
#[derive(Debug, Serialize)]
pub struct NotebooksView {
    pub notebooks: Vec<Notebook>,
    pub users: Vec<UserPresence>,
}

impl From<Room> for NotebooksView {
    fn from(room: Room) -> Self {
        Self {
            notebooks: room.notebooks,
            users: room.users,
        }
    }
}

/// Presence-only view returned by heartbeat.
#[derive(Debug, Serialize)]
pub struct UsersView {
    pub users: Vec<UserPresence>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// User ids are opaque client tokens; the only boundary rule is presence.
fn require_user_id(user_id: &str) -> AppResult<()> {
    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("userId is required".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /rooms
// ---------------------------------------------------------------------------

/// Create a room with the default notebook, seeded with the creator's
/// presence.
pub async fn create_room(
    State(state): State<AppState>,
    Json(input): Json<CreateRoomRequest>,
) -> AppResult<impl IntoResponse> {
    require_user_id(&input.user_id)?;
    let username = username::validate(&input.username)?;

    let room = RoomRepo::create_room(state.store.as_ref(), &input.user_id, &username).await?;
    tracing::info!(room_id = %room.id, "Room created");
    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse { room_id: room.id }),
    ))
}

// ---------------------------------------------------------------------------
// GET /rooms/{room_id}
// ---------------------------------------------------------------------------

/// Poll current room state: notebooks (with color fallback applied) and
/// the active presence list. Does not mutate persisted presence.
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::get_room(state.store.as_ref(), &room_id).await?;
    Ok(Json(RoomView::from(room)))
}

// ---------------------------------------------------------------------------
// POST /rooms/{room_id}/publish
// ---------------------------------------------------------------------------

/// Publish draft content to one notebook (last-write-wins) and refresh
/// the publisher's presence.
pub async fn publish_content(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(input): Json<PublishContentRequest>,
) -> AppResult<impl IntoResponse> {
    require_user_id(&input.user_id)?;
    let username = username::validate(&input.username)?;
    if input.notebook_id.is_empty() {
        return Err(AppError::BadRequest("notebookId is required".to_string()));
    }

    let room = RoomRepo::publish_content(
        state.store.as_ref(),
        &room_id,
        &input.notebook_id,
        input.content,
        &input.user_id,
        &username,
    )
    .await?;
    tracing::info!(
        room_id = %room_id,
        notebook_id = %input.notebook_id,
        "Content published"
    );
    Ok(Json(RoomView::from(room)))
}

// ---------------------------------------------------------------------------
// POST /rooms/{room_id}/notebooks
// ---------------------------------------------------------------------------

/// Add a named notebook to the room.
pub async fn add_notebook(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(input): Json<AddNotebookRequest>,
) -> AppResult<impl IntoResponse> {
    require_user_id(&input.user_id)?;
    let username = username::validate(&input.username)?;
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("notebook name is required".to_string()));
    }

    let room = RoomRepo::add_notebook(
        state.store.as_ref(),
        &room_id,
        &input.name,
        &input.user_id,
        &username,
    )
    .await?;
    tracing::info!(room_id = %room_id, name = %input.name.trim(), "Notebook added");
    Ok((StatusCode::CREATED, Json(NotebooksView::from(room))))
}

// ---------------------------------------------------------------------------
// DELETE /rooms/{room_id}/notebooks/{notebook_id}
// ---------------------------------------------------------------------------

/// Delete a notebook. Rejected if it is the last one in the room.
pub async fn delete_notebook(
    State(state): State<AppState>,
    Path((room_id, notebook_id)): Path<(String, String)>,
    Json(input): Json<PresenceRequest>,
) -> AppResult<impl IntoResponse> {
    require_user_id(&input.user_id)?;
    let username = username::validate(&input.username)?;

    let room = RoomRepo::delete_notebook(
        state.store.as_ref(),
        &room_id,
        &notebook_id,
        &input.user_id,
        &username,
    )
    .await?;
    tracing::info!(room_id = %room_id, notebook_id = %notebook_id, "Notebook deleted");
    Ok(Json(NotebooksView::from(room)))
}

// ---------------------------------------------------------------------------
// POST /rooms/{room_id}/heartbeat
// ---------------------------------------------------------------------------

/// Refresh the caller's presence. Touches only the presence set and the
/// room's activity timestamp, never notebook content.
pub async fn heartbeat(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(input): Json<PresenceRequest>,
) -> AppResult<impl IntoResponse> {
    require_user_id(&input.user_id)?;
    let username = username::validate(&input.username)?;

    let room =
        RoomRepo::heartbeat(state.store.as_ref(), &room_id, &input.user_id, &username).await?;
    Ok(Json(UsersView { users: room.users }))
}
