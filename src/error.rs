//! Failure taxonomy for the grouping store and its collaborators.
//!
//! Parse failures are recovered internally (the store falls back to a
//! synthesized document), so they rarely escape the crate. Write failures must
//! escape: the user's edits would otherwise be lost silently. Invalid
//! operations reject without touching the in-memory document.

use std::io;
use std::path::PathBuf;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
/// Errors surfaced by the store, sidecar codec, and session.
pub enum AppError {
    /// The sidecar file exists but does not match the expected schema.
    #[error("sidecar parse error: {message}")]
    Parse {
        /// What the validator rejected.
        message: String,
    },

    /// The sidecar file could not be written. The in-memory document is still
    /// valid; a later edit retries the write.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Sidecar path the write targeted.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// An operation referenced a missing section or file entry, or attempted
    /// something forbidden on the default section.
    #[error("invalid operation: {message}")]
    InvalidState {
        /// Why the operation was rejected.
        message: String,
    },

    /// Directory enumeration or another filesystem read failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The folder change notifier could not be created or repointed.
    #[error(transparent)]
    Watch(#[from] notify::Error),
}

impl AppError {
    /// Shorthand for an [`AppError::InvalidState`] with the given message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Shorthand for an [`AppError::Parse`] with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}
