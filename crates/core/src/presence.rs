//! Presence tracking: upsert-and-prune over a room's user set.
//!
//! Liveness is evaluated lazily on every read or write that touches
//! presence; there is no background sweep. Write paths prune before
//! persisting so stale entries are evicted from the durable document over
//! time, not just hidden from reads.

use crate::room::UserPresence;
use crate::types::UnixMillis;

/// Users with no activity for this long are considered gone.
pub const USER_INACTIVITY_TIMEOUT_MS: i64 = 60_000;

/// Record activity for `user_id`, then prune stale entries.
///
/// An existing entry gets its `lastSeen` refreshed and its username
/// overwritten (clients may rename mid-session); an unknown id is
/// inserted. This is the single mutation path for presence; every
/// mutating room operation funnels through it before persisting.
pub fn touch(users: &mut Vec<UserPresence>, user_id: &str, username: &str, now_ms: UnixMillis) {
    match users.iter_mut().find(|u| u.id == user_id) {
        Some(user) => {
            user.last_seen = now_ms;
            user.username = username.to_string();
        }
        None => users.push(UserPresence {
            id: user_id.to_string(),
            username: username.to_string(),
            last_seen: now_ms,
        }),
    }
    prune(users, now_ms);
}

/// Drop every entry with `now - lastSeen >= USER_INACTIVITY_TIMEOUT_MS`.
pub fn prune(users: &mut Vec<UserPresence>, now_ms: UnixMillis) {
    users.retain(|u| now_ms - u.last_seen < USER_INACTIVITY_TIMEOUT_MS);
}

/// The active subset of `users`, leaving the input untouched.
///
/// Used by the pure read path, which filters the returned view without
/// persisting the pruned set.
pub fn active(users: &[UserPresence], now_ms: UnixMillis) -> Vec<UserPresence> {
    users
        .iter()
        .filter(|u| now_ms - u.last_seen < USER_INACTIVITY_TIMEOUT_MS)
        .cloned()
        .collect()
}
