//! Username boundary validation.

use crate::error::CoreError;

/// Minimum username length after trimming.
pub const USERNAME_MIN_LEN: usize = 2;

/// Maximum username length after trimming.
pub const USERNAME_MAX_LEN: usize = 20;

/// Validate a raw username, returning the trimmed form that gets stored.
///
/// Usernames are opaque display strings; the only rule is a trimmed
/// length in `[2, 20]` characters. Re-validated on every operation that
/// carries one, since clients may rename mid-session.
pub fn validate(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(CoreError::InvalidUsername(format!(
            "must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters, got {len}"
        )));
    }
    Ok(trimmed.to_string())
}
