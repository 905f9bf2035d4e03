//! Route definitions for the room reconciliation gateway.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

/// Room routes mounted at `/rooms`.
///
/// ```text
/// POST   /                                  -> create_room
/// GET    /{room_id}                         -> get_room
/// POST   /{room_id}/publish                 -> publish_content
/// POST   /{room_id}/notebooks               -> add_notebook
/// DELETE /{room_id}/notebooks/{notebook_id} -> delete_notebook
/// POST   /{room_id}/heartbeat               -> heartbeat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rooms::create_room))
        .route("/{room_id}", get(rooms::get_room))
        .route("/{room_id}/publish", post(rooms::publish_content))
        .route("/{room_id}/notebooks", post(rooms::add_notebook))
        .route(
            "/{room_id}/notebooks/{notebook_id}",
            delete(rooms::delete_notebook),
        )
        .route("/{room_id}/heartbeat", post(rooms::heartbeat))
}
