//! # Config Commands
//!
//! Tauri commands for the ledger's column configuration.

use serde::Serialize;
use swipe_core::ColumnConfig;
use swipe_ledger::RecordStore;
use tauri::State;
use tracing::{debug, info};

use crate::error::{respond, ApiResponse, CommandResult};
use crate::state::LedgerState;

/// Column configuration wrapper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsPayload {
    pub columns: ColumnConfig,
}

/// Gets the current column configuration.
///
/// ## When Used
/// - App startup (table headers)
/// - Settings screen
#[tauri::command]
pub async fn get_column_config(ledger: State<'_, LedgerState>) -> CommandResult<ColumnsPayload> {
    debug!("get_column_config command");

    Ok(ApiResponse::success(ColumnsPayload {
        columns: ledger.ledger().column_config(),
    }))
}

/// Saves a new column configuration.
///
/// An existing ledger is rewritten with the new header; rows are kept.
#[tauri::command]
pub async fn save_column_config(
    ledger: State<'_, LedgerState>,
    columns: ColumnConfig,
) -> CommandResult<ColumnsPayload> {
    info!(header = %columns.header_line(), "save_column_config command");

    let result = ledger
        .run(move |l| {
            l.set_column_config(columns)
                .map(|columns| ColumnsPayload { columns })
        })
        .await?;

    Ok(respond(result))
}
