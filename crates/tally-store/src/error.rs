/// Errors from snapshot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O failure in the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot line is malformed. Corruption is never partial: the whole
    /// load is abandoned.
    #[error("corrupt snapshot at line {line}: {reason}")]
    CorruptLine { line: usize, reason: String },

    /// The snapshot bytes are not valid UTF-8 text.
    #[error("corrupt snapshot: not valid UTF-8")]
    NotUtf8,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
