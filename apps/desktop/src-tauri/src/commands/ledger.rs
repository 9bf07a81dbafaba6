//! # Ledger Commands
//!
//! Tauri commands for locating, opening, browsing and editing the ledger.
//!
//! All file access runs on the blocking pool via [`LedgerState::run`].

use std::path::PathBuf;

use serde::Serialize;
use swipe_core::{AccountRecord, DedupReport, RecordPage};
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::error::{respond, ApiError, ApiResponse, CommandResult};
use crate::state::LedgerState;

// =============================================================================
// Payloads
// =============================================================================

/// Location of the ledger file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPathPayload {
    pub path: String,
}

/// Ledger directory and the file inside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDirectoryPayload {
    pub directory: String,
    pub path: String,
}

/// Record count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCountPayload {
    pub count: u32,
}

/// A single edited record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub record: AccountRecord,
}

// =============================================================================
// Location
// =============================================================================

/// Gets the full path of the ledger file.
///
/// The file may not exist yet; it is created by the first write.
#[tauri::command]
pub async fn get_ledger_path(ledger: State<'_, LedgerState>) -> CommandResult<LedgerPathPayload> {
    let path = ledger.ledger().ledger_path();
    debug!(path = %path.display(), "get_ledger_path command");

    Ok(ApiResponse::success(LedgerPathPayload {
        path: path.display().to_string(),
    }))
}

/// Gets the directory the ledger currently lives in.
#[tauri::command]
pub async fn get_ledger_directory(
    ledger: State<'_, LedgerState>,
) -> CommandResult<LedgerDirectoryPayload> {
    debug!("get_ledger_directory command");
    let ledger = ledger.ledger();

    Ok(ApiResponse::success(LedgerDirectoryPayload {
        directory: ledger.ledger_directory().display().to_string(),
        path: ledger.ledger_path().display().to_string(),
    }))
}

/// Asks the user for a new ledger directory and persists the choice.
///
/// ## Flow
/// ```text
/// native folder picker ──► None ──► { success: false, code: CANCELLED }
///          │
///          ▼ Some(dir)
/// CsvLedger::set_ledger_directory(dir) ──► settings.toml updated
///          │
///          ▼
/// { success: true, directory, path }
/// ```
///
/// Existing records stay where they are; the next write creates a new
/// ledger in the chosen directory.
#[tauri::command]
pub async fn select_ledger_directory(
    app: AppHandle,
    ledger: State<'_, LedgerState>,
) -> CommandResult<LedgerDirectoryPayload> {
    info!("select_ledger_directory command");

    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .set_title("Select Ledger Directory")
        .set_directory(ledger.ledger().ledger_directory())
        .pick_folder(move |folder| {
            let _ = tx.send(folder);
        });

    let folder = rx
        .await
        .map_err(|_| ApiError::internal("Folder dialog closed without a response"))?;

    let Some(folder) = folder else {
        debug!("Folder selection cancelled");
        return Ok(ApiResponse::failure(ApiError::cancelled(
            "Folder selection cancelled",
        )));
    };

    let dir: PathBuf = match folder.into_path() {
        Ok(dir) => dir,
        Err(e) => return Ok(ApiResponse::failure(ApiError::internal(e.to_string()))),
    };

    let result = ledger
        .run(move |l| {
            let path = l.set_ledger_directory(&dir)?;
            Ok(LedgerDirectoryPayload {
                directory: dir.display().to_string(),
                path: path.display().to_string(),
            })
        })
        .await?;

    Ok(respond(result))
}

/// Opens the ledger in the system's default application.
///
/// A header-only ledger is created first if none exists.
#[tauri::command]
pub async fn open_ledger_file(
    app: AppHandle,
    ledger: State<'_, LedgerState>,
) -> CommandResult<LedgerPathPayload> {
    info!("open_ledger_file command");

    let path = match ledger.run(|l| l.ensure_exists()).await? {
        Ok(path) => path,
        Err(e) => return Ok(ApiResponse::failure(e.into())),
    };

    let result = app
        .opener()
        .open_path(path.to_string_lossy(), None::<&str>)
        .map(|()| LedgerPathPayload {
            path: path.display().to_string(),
        })
        .map_err(|e| ApiError::internal(format!("Failed to open ledger: {e}")));

    Ok(respond(result))
}

// =============================================================================
// Maintenance
// =============================================================================

/// Removes duplicate account numbers and re-sorts the ledger.
#[tauri::command]
pub async fn deduplicate_ledger(ledger: State<'_, LedgerState>) -> CommandResult<DedupReport> {
    info!("deduplicate_ledger command");
    Ok(respond(ledger.run(|l| l.deduplicate()).await?))
}

// =============================================================================
// Browsing & Editing
// =============================================================================

/// Gets ledger records.
///
/// ## Parameters
/// - `page`: Zero-based page index (default: 0)
/// - `page_size`: Records per page (default: all records)
#[tauri::command]
pub async fn get_records(
    ledger: State<'_, LedgerState>,
    page: Option<u32>,
    page_size: Option<u32>,
) -> CommandResult<RecordPage> {
    debug!(?page, ?page_size, "get_records command");

    let result = ledger
        .run(move |l| match page_size {
            Some(size) => l.page(page.unwrap_or(0), size),
            None => {
                let all = u32::try_from(l.count()?).unwrap_or(u32::MAX);
                l.page(0, all)
            }
        })
        .await?;

    Ok(respond(result))
}

/// Gets the number of records in the ledger.
#[tauri::command]
pub async fn get_record_count(ledger: State<'_, LedgerState>) -> CommandResult<RecordCountPayload> {
    debug!("get_record_count command");

    let result = ledger
        .run(|l| {
            Ok(RecordCountPayload {
                count: u32::try_from(l.count()?).unwrap_or(u32::MAX),
            })
        })
        .await?;

    Ok(respond(result))
}

/// Edits one field of a record.
///
/// `column` is a header name or one of the role keys `amount` and
/// `activated`. The account number itself cannot be edited.
#[tauri::command]
pub async fn update_record_field(
    ledger: State<'_, LedgerState>,
    account_number: String,
    column: String,
    value: String,
) -> CommandResult<RecordPayload> {
    info!(%account_number, %column, "update_record_field command");

    let result = ledger
        .run(move |l| {
            l.update_field(&account_number, &column, &value)
                .map(|record| RecordPayload { record })
        })
        .await?;

    Ok(respond(result))
}
