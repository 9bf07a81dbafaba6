//! # Capture Error Types
//!
//! Errors returned to callers of the capture handle.
//!
//! Swipe processing failures are NOT errors here: a payload that fails to
//! decode or a ledger write that fails becomes a
//! [`CaptureOutcome::SwipeError`](swipe_core::CaptureOutcome) event and
//! capture keeps running. These variants cover the request/response paths
//! (manual entry, lifecycle commands) and a dead controller task.

use swipe_core::{ErrorKind, ValidationError};
use swipe_ledger::LedgerError;
use thiserror::Error;

/// Result type alias for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Capture error type.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Invalid capture configuration.
    #[error("Invalid capture configuration: {0}")]
    InvalidConfig(String),

    /// The controller task is gone.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// Blocking ledger task panicked or was cancelled.
    #[error("Ledger task failed: {0}")]
    TaskFailed(String),

    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Invalid caller input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CaptureError {
    /// Stable category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::Ledger(e) => e.kind(),
            CaptureError::Validation(_) | CaptureError::InvalidConfig(_) => {
                ErrorKind::InvalidInput
            }
            CaptureError::ChannelError(_) | CaptureError::TaskFailed(_) => ErrorKind::StorageIo,
        }
    }

    /// Message suitable for an operator notification.
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::Ledger(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for CaptureError {
    fn from(err: tokio::task::JoinError) -> Self {
        CaptureError::TaskFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_passes_through_ledger_errors() {
        let err = CaptureError::from(LedgerError::StorageFull {
            path: PathBuf::from("/x"),
        });
        assert_eq!(err.kind(), ErrorKind::StorageFull);
        assert_eq!(err.user_message(), "Disk full. Please free up space.");
    }

    #[test]
    fn test_validation_kind() {
        let err = CaptureError::from(ValidationError::Required {
            field: "account number".into(),
        });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.user_message(), "account number is required");
    }
}
