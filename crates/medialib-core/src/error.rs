use thiserror::Error;

/// Reasons a media library item cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item path is empty")]
    EmptyPath,

    #[error("unknown item type '{0}' (expected 'file' or 'folder')")]
    InvalidKind(String),

    #[error("item size {0} is negative")]
    NegativeSize(i64),

    #[error("modification time {0} is negative")]
    NegativeTimestamp(i64),

    #[error("modification time {0} is outside the supported calendar range")]
    TimestampOutOfRange(i64),
}
