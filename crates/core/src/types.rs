/// All room-level timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Notebook `lastUpdate` and presence `lastSeen` are unix epoch
/// milliseconds, matching the stored document shape.
pub type UnixMillis = i64;
