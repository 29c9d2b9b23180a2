//! Error types for the sync engine.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
///
/// Two conditions are deliberately *not* errors: a call skipped because a
/// session is already in flight, and a remote snapshot that does not exist
/// yet. Both are reported as [`crate::SyncOutcome`] variants instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No sync endpoint is configured.
    #[error("no sync endpoint configured")]
    NotConfigured,

    /// The remote read, write, or probe failed.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The remote snapshot exists but is not a valid document.
    #[error("corrupt remote snapshot: {0}")]
    CorruptData(String),

    /// A local snapshot failed to encode.
    #[error("codec error: {0}")]
    Codec(String),

    /// The local store failed during sync.
    #[error("store error: {0}")]
    Store(#[from] croft_store::StoreError),
}

impl SyncError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
