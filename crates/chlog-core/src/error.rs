//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] chlog_git::GitError),

    /// File read or write error.
    #[error(transparent)]
    File(#[from] crate::FileError),

    /// Two commits in range share a short hash.
    #[error("ambiguous commits: {0}")]
    ShortHashCollision(#[from] chlog_commit::ShortHashCollision),

    /// Timestamp not in `year-month-day-hour-minute-second` form.
    #[error("malformed timestamp {input:?}: {reason}")]
    MalformedTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Range start lies after its end.
    #[error("invalid range: {since} is after {until}")]
    InvalidRange {
        /// Range start.
        since: String,
        /// Range end.
        until: String,
    },

    /// Override block pattern could not be built.
    #[error("invalid override header pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
