//! Random short identifiers for rooms and notebooks.
//!
//! Identifiers are drawn uniformly (with replacement) from the 62-char
//! alphanumeric alphabet. Generation cannot fail; uniqueness is the
//! caller's job (the repository retries room ids against the store).

use rand::distr::Alphanumeric;
use rand::Rng;

/// Room ids are short so they stay shareable and typeable.
pub const ROOM_ID_LEN: usize = 4;

/// Notebook ids only need to be unique within one room, but are longer so
/// the repository does not have to re-check collisions per room.
pub const NOTEBOOK_ID_LEN: usize = 8;

/// How many room-id candidates the repository tries before giving up.
pub const MAX_ROOM_ID_ATTEMPTS: u32 = 10;

/// Generate a random alphanumeric identifier of `len` characters.
pub fn generate(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
