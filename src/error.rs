use thiserror::Error;

pub type Result<T> = std::result::Result<T, LystraError>;

#[derive(Debug, Error)]
pub enum LystraError {
    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid deadline '{0}': expected YYYY-MM-DD with a 4-digit year")]
    InvalidDeadline(String),

    #[error("Index {index} out of range for {container} of length {len}")]
    IndexOutOfRange {
        container: String,
        index: usize,
        len: usize,
    },

    #[error("Sync failed: {0}")]
    SyncFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
