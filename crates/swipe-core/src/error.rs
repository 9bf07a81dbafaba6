//! # Error Types
//!
//! Domain-specific error types for swipe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  swipe-core errors (this file)                                         │
//! │  ├── DecodeFailure    - No account number in a swipe payload           │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Stable, serializable failure category          │
//! │                                                                         │
//! │  swipe-ledger errors (separate crate)                                  │
//! │  └── LedgerError      - Ledger file / settings failures                │
//! │                                                                         │
//! │  Tauri API errors (in app)                                             │
//! │  └── ApiError         - What frontend sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError → ApiError → Frontend             │
//! │        DecodeFailure   → CaptureOutcome::SwipeError → Frontend         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, column, payload preview)
//! 3. Every error maps to exactly one [`ErrorKind`]

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Kind
// =============================================================================

/// Stable failure category surfaced to external layers.
///
/// Platform errors (errno values, io kinds) never cross the boundary; they
/// are folded into one of these so the UI can render consistent messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No identifier could be extracted from a swipe.
    DecodeFailure,
    /// The ledger file or directory is not writable/readable.
    StoragePermissionDenied,
    /// The disk holding the ledger is full.
    StorageFull,
    /// The ledger directory (or file) does not exist.
    StoragePathMissing,
    /// Existing ledger data is malformed.
    StorageParseAnomaly,
    /// Any other I/O failure.
    StorageIo,
    /// Caller supplied invalid data.
    InvalidInput,
}

impl ErrorKind {
    /// Operator-facing message for this category.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::DecodeFailure => "Failed to extract account number from swipe data",
            ErrorKind::StoragePermissionDenied => {
                "Permission denied. Please check file permissions."
            }
            ErrorKind::StorageFull => "Disk full. Please free up space.",
            ErrorKind::StoragePathMissing => {
                "Directory not found. Please check ledger directory settings."
            }
            ErrorKind::StorageParseAnomaly => "Ledger file contains malformed lines.",
            ErrorKind::StorageIo => "Failed to access the ledger file.",
            ErrorKind::InvalidInput => "Invalid input.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::DecodeFailure => "decode-failure",
            ErrorKind::StoragePermissionDenied => "storage-permission-denied",
            ErrorKind::StorageFull => "storage-full",
            ErrorKind::StoragePathMissing => "storage-path-missing",
            ErrorKind::StorageParseAnomaly => "storage-parse-anomaly",
            ErrorKind::StorageIo => "storage-io",
            ErrorKind::InvalidInput => "invalid-input",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Decode Failure
// =============================================================================

/// Maximum number of payload characters kept in a [`DecodeFailure`].
pub const PAYLOAD_PREVIEW_CHARS: usize = 50;

/// A swipe payload that matched none of the track patterns.
///
/// Only a truncated preview of the payload is kept so that full stripe
/// data never ends up in logs or UI notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to extract account number from swipe data")]
pub struct DecodeFailure {
    preview: String,
}

impl DecodeFailure {
    /// Creates a failure for the given raw payload.
    pub fn new(raw: &str) -> Self {
        DecodeFailure {
            preview: payload_preview(raw),
        }
    }

    /// Truncated payload (first 50 characters followed by `...`).
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Truncates a payload for logging.
///
/// ## Example
/// ```rust
/// use swipe_core::error::payload_preview;
///
/// assert_eq!(payload_preview("abc"), "abc...");
/// assert_eq!(payload_preview(&"9".repeat(80)).len(), 53);
/// ```
pub fn payload_preview(raw: &str) -> String {
    let mut preview: String = raw.chars().take(PAYLOAD_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when operator input (manual entry, column names,
/// field edits) doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. a comma inside a ledger value).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two columns with the same header text).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Referenced column does not exist in the current schema.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Column cannot be edited in place.
    #[error("Column {0} cannot be edited")]
    ReadOnlyColumn(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_truncates_payload() {
        let raw = "X".repeat(120);
        let err = DecodeFailure::new(&raw);
        assert_eq!(err.preview().len(), PAYLOAD_PREVIEW_CHARS + 3);
        assert!(err.preview().ends_with("..."));
        assert_eq!(
            err.to_string(),
            "Failed to extract account number from swipe data"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "account number".to_string(),
        };
        assert_eq!(err.to_string(), "account number is required");

        let err = ValidationError::UnknownColumn("balance".to_string());
        assert_eq!(err.to_string(), "Unknown column: balance");
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::StorageFull).unwrap();
        assert_eq!(json, "\"STORAGE_FULL\"");
        assert_eq!(ErrorKind::StoragePathMissing.to_string(), "storage-path-missing");
    }
}
