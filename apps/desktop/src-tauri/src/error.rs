//! # API Error Type
//!
//! Unified error and response envelope for Tauri commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Swipe Ledger                           │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  invoke('deduplicate_ledger')                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<ApiResponse<T>, ApiError>                                │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Ledger Error? ─── LedgerError::StorageFull ───┐                │  │
//! │  │         │                                      │                │  │
//! │  │         ▼                                      ▼                │  │
//! │  │  Validation Error? ─── ValidationError ─── ApiResponse::failure │  │
//! │  │         │                                   { success: false }  │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─────────────────────────────── ApiResponse::success ─►│  │
//! │  │                                          { success: true, ... } │  │
//! │  │                                                                  │  │
//! │  │  Command itself broke (task panicked) ────────── Err(ApiError) ►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  const res = await invoke('deduplicate_ledger');                        │
//! │  if (!res.success) {                                                    │
//! │    // res.error = "Disk full. Please free up space."                    │
//! │    // res.code  = "STORAGE_FULL"                                        │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tauri Error Serialization
//! Tauri requires errors to be serializable. We implement `Serialize`
//! and include both a machine-readable `code` and human-readable `message`.

use serde::Serialize;
use swipe_capture::CaptureError;
use swipe_core::{ErrorKind, ValidationError};
use swipe_ledger::LedgerError;

/// API error produced by a command.
///
/// ## Serialization
/// ```json
/// {
///   "code": "STORAGE_PATH_MISSING",
///   "message": "Directory not found. Please check ledger directory settings."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// The first block mirrors [`ErrorKind`]; the rest only exist at the
/// command boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    DecodeFailure,
    StoragePermissionDenied,
    StorageFull,
    StoragePathMissing,
    StorageParseAnomaly,
    StorageIo,
    InvalidInput,

    /// Record lookup failed
    NotFound,

    /// The user closed a dialog without choosing
    Cancelled,

    /// Platform integration failed (dialog, opener, background task)
    Internal,
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DecodeFailure => ErrorCode::DecodeFailure,
            ErrorKind::StoragePermissionDenied => ErrorCode::StoragePermissionDenied,
            ErrorKind::StorageFull => ErrorCode::StorageFull,
            ErrorKind::StoragePathMissing => ErrorCode::StoragePathMissing,
            ErrorKind::StorageParseAnomaly => ErrorCode::StorageParseAnomaly,
            ErrorKind::StorageIo => ErrorCode::StorageIo,
            ErrorKind::InvalidInput => ErrorCode::InvalidInput,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a cancelled error.
    pub fn cancelled(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Cancelled, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts ledger errors to API errors.
impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::RecordNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            LedgerError::SettingsLoadFailed(_) | LedgerError::SettingsSaveFailed(_) => {
                tracing::error!(error = %err, "Settings operation failed");
                ApiError::new(err.kind().into(), err.to_string())
            }
            _ => ApiError::new(err.kind().into(), err.user_message()),
        }
    }
}

/// Converts capture errors to API errors.
impl From<CaptureError> for ApiError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::Ledger(e) => e.into(),
            CaptureError::ChannelError(_) | CaptureError::TaskFailed(_) => {
                tracing::error!(error = %err, "Capture controller unavailable");
                ApiError::internal(err.to_string())
            }
            other => ApiError::new(other.kind().into(), other.user_message()),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::InvalidInput, err.to_string())
    }
}

/// Makes ApiError work as a Tauri command error.
///
/// Tauri requires the error type to implement `Into<tauri::ipc::InvokeError>`.
/// Since we implement `Serialize`, we can convert to JSON string.
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Response Envelope
// =============================================================================

/// What every command resolves to.
///
/// ```json
/// { "success": true, "accountNumber": "123456", "duplicate": false }
/// { "success": false, "error": "Disk full. Please free up space.", "code": "STORAGE_FULL" }
/// ```
///
/// `data` is flattened, so `T` must serialize as a JSON object.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,

    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            error: None,
            code: None,
            data: Some(data),
        }
    }

    /// Failed response.
    pub fn failure(err: ApiError) -> Self {
        ApiResponse {
            success: false,
            error: Some(err.message),
            code: Some(err.code),
            data: None,
        }
    }
}

/// Folds an operation result into a response envelope.
pub fn respond<T, E>(result: Result<T, E>) -> ApiResponse<T>
where
    T: Serialize,
    E: Into<ApiError>,
{
    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => {
            let err = err.into();
            tracing::warn!(code = ?err.code, message = %err.message, "Command failed");
            ApiResponse::failure(err)
        }
    }
}

/// Return type of every command.
///
/// `Err` is reserved for failures to run the command at all; operation
/// failures travel inside [`ApiResponse`].
pub type CommandResult<T> = Result<ApiResponse<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Written {
        account_number: String,
        duplicate: bool,
    }

    #[test]
    fn test_success_flattens_payload() {
        let res = ApiResponse::success(Written {
            account_number: "123456".into(),
            duplicate: false,
        });

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({ "success": true, "accountNumber": "123456", "duplicate": false })
        );
    }

    #[test]
    fn test_failure_carries_message_and_code() {
        let res: ApiResponse<Written> = respond(Err(LedgerError::StorageFull {
            path: PathBuf::from("/ledger/giftcards.csv"),
        }));

        assert_eq!(
            serde_json::to_value(&res).unwrap(),
            json!({
                "success": false,
                "error": "Disk full. Please free up space.",
                "code": "STORAGE_FULL",
            })
        );
    }

    #[test]
    fn test_storage_errors_use_operator_messages() {
        let err: ApiError = LedgerError::PermissionDenied {
            path: PathBuf::from("/ledger"),
        }
        .into();
        assert_eq!(err.code, ErrorCode::StoragePermissionDenied);
        assert_eq!(err.message, "Permission denied. Please check file permissions.");

        let err: ApiError = LedgerError::PathMissing {
            path: PathBuf::from("/gone"),
        }
        .into();
        assert_eq!(err.code, ErrorCode::StoragePathMissing);
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: ApiError = LedgerError::RecordNotFound("42".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_capture_channel_errors_are_internal() {
        let err: ApiError = CaptureError::ChannelError("controller channel closed".into()).into();
        assert_eq!(err.code, ErrorCode::Internal);

        let err: ApiError = CaptureError::Ledger(LedgerError::StorageFull {
            path: PathBuf::from("/x"),
        })
        .into();
        assert_eq!(err.code, ErrorCode::StorageFull);
    }

    #[test]
    fn test_display_format() {
        let err = ApiError::cancelled("Selection cancelled");
        assert_eq!(err.to_string(), "[Cancelled] Selection cancelled");
    }
}
