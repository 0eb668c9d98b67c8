//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A shared adapter lock was poisoned by a panicking writer.
    #[error("Adapter lock poisoned")]
    LockPoisoned,

    /// Scaffolding stopped after some files were already written.
    #[error("Scaffold stopped after {written} file(s) at {path}: {reason}")]
    PartialWrite {
        written: usize,
        path: PathBuf,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the disk is not full".into(),
            ],
            Self::LockPoisoned => vec!["Try again in a moment".into()],
            Self::PartialWrite { path, .. } => vec![
                format!("Files already written under {} were kept", path.display()),
                "Fix the cause and run the same command again; files are overwritten".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::PartialWrite { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
        }
    }
}
