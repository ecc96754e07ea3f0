//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum ReplabError {
    /// A batch larger than the current contents of a buffer was requested.
    #[error("Insufficient data: requested {requested} transitions, {available} available")]
    InsufficientData {
        /// Requested batch size.
        requested: usize,

        /// Number of transitions in the buffer.
        available: usize,
    },

    /// Configuration with invalid values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The lock of a shared buffer was poisoned by a panicking thread.
    #[error("Lock of the shared buffer is poisoned")]
    Poisoned,

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
