//! Repository layer.
//!
//! [`RoomRepo`] is a zero-sized struct providing async operations that
//! accept a `&dyn RoomStore` as the first argument, so the same protocol
//! runs against PostgreSQL in deployment and the in-memory store in tests.

pub mod room_repo;

pub use room_repo::{RoomOpError, RoomRepo};
