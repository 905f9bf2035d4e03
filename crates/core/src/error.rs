/// The domain error taxonomy shared by the repository and gateway layers.
///
/// Every variant maps to a structured result at the HTTP boundary; nothing
/// here is thrown past an operation call.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    /// The room does not exist, or existed and has expired (expired rooms
    /// are reaped on first read and surfaced identically to absent ones).
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Could not allocate an unused room identifier within the attempt
    /// bound.
    #[error("Failed to allocate a unique room id after {attempts} attempts")]
    RoomCreationFailed { attempts: u32 },

    /// The targeted notebook id does not exist in the room.
    #[error("Notebook not found: {0}")]
    NotebookNotFound(String),

    /// A sibling notebook already carries this (trimmed) name.
    #[error("A notebook named \"{0}\" already exists in this room")]
    NotebookNameExists(String),

    /// Deleting this notebook would leave the room with none.
    #[error("Cannot delete the last notebook in a room")]
    CannotDeleteLastNotebook,

    /// Username failed boundary validation.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
}
