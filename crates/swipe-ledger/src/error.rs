//! # Ledger Error Types
//!
//! Error types for ledger file and settings operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error (EACCES, ENOSPC, ENOENT, ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError (this module) ← Adds path context and categorization      │
//! │       │                                                                 │
//! │       ├──► ErrorKind (swipe-core) ← Stable category for events         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in Tauri app) ← Serialized for frontend                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::path::{Path, PathBuf};

use swipe_core::{ErrorKind, ValidationError};
use thiserror::Error;

/// Ledger operation errors.
///
/// Platform error codes never escape this type: every I/O failure is
/// folded into one of the storage variants by [`LedgerError::from_io`].
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file or its directory cannot be read or written.
    ///
    /// ## When This Occurs
    /// - EACCES / EPERM on open, write or rename
    /// - Read-only mount
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// The disk holding the ledger is full (ENOSPC).
    #[error("Disk full while writing {}", path.display())]
    StorageFull { path: PathBuf },

    /// The ledger directory or file does not exist.
    ///
    /// ## When This Occurs
    /// - Configured directory was removed or unmounted
    /// - Deduplicating before any card was captured
    #[error("Path not found: {}", path.display())]
    PathMissing { path: PathBuf },

    /// A ledger line could not be parsed (strict load mode only).
    #[error("Malformed ledger line {line}: {reason}")]
    ParseAnomaly { line: usize, reason: String },

    /// Any other I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No record with the given account number.
    #[error("Account {0} not found in ledger")]
    RecordNotFound(String),

    /// Invalid caller input (column names, field values).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Settings file could not be read or parsed.
    #[error("Failed to load settings: {0}")]
    SettingsLoadFailed(String),

    /// Settings file could not be written.
    #[error("Failed to save settings: {0}")]
    SettingsSaveFailed(String),
}

impl LedgerError {
    /// Categorizes an I/O error raised while touching `path`.
    ///
    /// ## Error Mapping
    /// ```text
    /// PermissionDenied (EACCES, EPERM)  → LedgerError::PermissionDenied
    /// NotFound (ENOENT)                 → LedgerError::PathMissing
    /// ENOSPC / ERROR_DISK_FULL          → LedgerError::StorageFull
    /// Other                             → LedgerError::Io
    /// ```
    pub fn from_io(err: io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        if is_disk_full(&err) {
            return LedgerError::StorageFull { path };
        }

        match err.kind() {
            io::ErrorKind::PermissionDenied => LedgerError::PermissionDenied { path },
            io::ErrorKind::NotFound => LedgerError::PathMissing { path },
            _ => LedgerError::Io { path, source: err },
        }
    }

    /// Stable category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::PermissionDenied { .. } => ErrorKind::StoragePermissionDenied,
            LedgerError::StorageFull { .. } => ErrorKind::StorageFull,
            LedgerError::PathMissing { .. } => ErrorKind::StoragePathMissing,
            LedgerError::ParseAnomaly { .. } => ErrorKind::StorageParseAnomaly,
            LedgerError::Io { .. } => ErrorKind::StorageIo,
            LedgerError::RecordNotFound(_) | LedgerError::Validation(_) => {
                ErrorKind::InvalidInput
            }
            LedgerError::SettingsLoadFailed(_) => ErrorKind::StorageParseAnomaly,
            LedgerError::SettingsSaveFailed(_) => ErrorKind::StorageIo,
        }
    }

    /// Message suitable for an operator notification.
    ///
    /// Storage failures use the fixed wording of their [`ErrorKind`];
    /// input errors keep their specific message.
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::RecordNotFound(_) | LedgerError::Validation(_) => self.to_string(),
            _ => self.kind().user_message().to_string(),
        }
    }
}

fn is_disk_full(err: &io::Error) -> bool {
    #[cfg(unix)]
    const DISK_FULL_CODES: &[i32] = &[28]; // ENOSPC
    #[cfg(windows)]
    const DISK_FULL_CODES: &[i32] = &[39, 112]; // ERROR_HANDLE_DISK_FULL, ERROR_DISK_FULL
    #[cfg(not(any(unix, windows)))]
    const DISK_FULL_CODES: &[i32] = &[];

    err.raw_os_error()
        .is_some_and(|code| DISK_FULL_CODES.contains(&code))
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::SettingsLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for LedgerError {
    fn from(err: toml::ser::Error) -> Self {
        LedgerError::SettingsSaveFailed(err.to_string())
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_permission_denied() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = LedgerError::from_io(err, "/ledger/giftcards.csv");
        assert!(matches!(err, LedgerError::PermissionDenied { .. }));
        assert_eq!(err.kind(), ErrorKind::StoragePermissionDenied);
        assert_eq!(
            err.user_message(),
            "Permission denied. Please check file permissions."
        );
    }

    #[test]
    fn test_from_io_not_found() {
        let err = io::Error::from(io::ErrorKind::NotFound);
        let err = LedgerError::from_io(err, "/missing");
        assert_eq!(err.kind(), ErrorKind::StoragePathMissing);
        assert_eq!(err.to_string(), "Path not found: /missing");
    }

    #[cfg(unix)]
    #[test]
    fn test_from_io_disk_full() {
        let err = io::Error::from_raw_os_error(28);
        let err = LedgerError::from_io(err, "/full");
        assert_eq!(err.kind(), ErrorKind::StorageFull);
    }

    #[test]
    fn test_from_io_other() {
        let err = io::Error::new(io::ErrorKind::Other, "weird");
        let err = LedgerError::from_io(err, "/x");
        assert_eq!(err.kind(), ErrorKind::StorageIo);
    }

    #[test]
    fn test_input_errors_keep_their_message() {
        let err = LedgerError::RecordNotFound("42".to_string());
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.user_message(), "Account 42 not found in ledger");
    }
}
