pub mod health;
pub mod rooms;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /rooms                                    create room (POST)
/// /rooms/{room_id}                          poll room state (GET)
/// /rooms/{room_id}/publish                  publish notebook content (POST)
/// /rooms/{room_id}/notebooks                add notebook (POST)
/// /rooms/{room_id}/notebooks/{notebook_id}  delete notebook (DELETE)
/// /rooms/{room_id}/heartbeat                presence heartbeat (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/rooms", rooms::router())
}
