use std::sync::Arc;

use sharepad_db::store::RoomStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The room document store. A trait object so deployment (PostgreSQL)
    /// and tests (in-memory) wire in different backends without touching
    /// the handlers.
    pub store: Arc<dyn RoomStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
