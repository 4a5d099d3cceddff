//! Error types for rangewire.

use thiserror::Error;

/// Session-level error for a sensor read session.
///
/// Per-frame rejections are not errors: every consumed window maps to a
/// [`DecodeOutcome`](crate::protocol::DecodeOutcome), valid or not. Only the
/// transport itself can fail, and a fault here ends the session.
#[derive(Debug, Error)]
pub enum RangewireError {
    /// I/O error reported by the byte source.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// The spawned read task did not run to completion.
    #[error("read task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias using RangewireError.
pub type Result<T> = std::result::Result<T, RangewireError>;
