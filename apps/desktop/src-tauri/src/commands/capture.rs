//! # Capture Commands
//!
//! Tauri commands that drive the capture controller.
//!
//! ## Key Forwarding
//! ```text
//! window.addEventListener('keydown', (e) => {
//!   invoke('submit_key_input', { input: {
//!     key: e.key, code: e.code, shift: e.shiftKey,
//!     ctrl: e.ctrlKey, alt: e.altKey, meta: e.metaKey,
//!   }});
//! });
//! ```
//!
//! Swipe results come back as `card-swiped` / `card-swipe-error` events,
//! not as command responses.

use serde::Serialize;
use swipe_capture::CaptureStatus;
use swipe_core::KeyInput;
use swipe_ledger::AppendOutcome;
use tauri::State;
use tracing::{debug, info};

use crate::error::{respond, CommandResult};
use crate::state::CaptureState;

/// Empty success payload.
#[derive(Debug, Clone, Serialize)]
pub struct Accepted {}

/// Starts a capture session.
///
/// Calling it while a session is active keeps the existing session.
#[tauri::command]
pub async fn start_capture(capture: State<'_, CaptureState>) -> CommandResult<CaptureStatus> {
    info!("start_capture command");
    Ok(respond(capture.handle().start().await))
}

/// Stops the capture session and drops any partial swipe.
#[tauri::command]
pub async fn stop_capture(capture: State<'_, CaptureState>) -> CommandResult<CaptureStatus> {
    info!("stop_capture command");
    Ok(respond(capture.handle().stop().await))
}

/// Forwards one keyboard event to the controller.
///
/// Ignored unless a session is active.
#[tauri::command]
pub async fn submit_key_input(
    capture: State<'_, CaptureState>,
    input: KeyInput,
) -> CommandResult<Accepted> {
    let result = capture.handle().on_raw_input(input).await;
    Ok(respond(result.map(|()| Accepted {})))
}

/// Gets the capture session status.
#[tauri::command]
pub async fn get_capture_status(capture: State<'_, CaptureState>) -> CommandResult<CaptureStatus> {
    debug!("get_capture_status command");
    Ok(respond(capture.handle().status().await))
}

/// Adds an account number typed in by the operator.
///
/// Goes through the controller so it is ordered with swipes.
///
/// ## Returns
/// ```json
/// { "success": true, "accountNumber": "123456", "duplicate": false }
/// ```
#[tauri::command]
pub async fn write_record(
    capture: State<'_, CaptureState>,
    account_number: String,
) -> CommandResult<AppendOutcome> {
    info!("write_record command");
    Ok(respond(capture.handle().write_record(account_number).await))
}
