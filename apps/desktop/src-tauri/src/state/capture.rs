//! # Capture State Module
//!
//! Holds the handle to the capture controller task and the sink that turns
//! its outcomes into frontend events.
//!
//! ## Event Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  CaptureController (tokio task)                                          │
//! │         │ OutcomeSink::emit                                              │
//! │         ▼                                                                │
//! │  TauriOutcomeSink ── app_handle.emit("card-swiped", ...) ──────────►     │
//! │                   └─ app_handle.emit("card-swipe-error", ...) ─────►     │
//! │                                                                          │
//! │  Frontend                                                                │
//! │  ────────                                                                │
//! │  import { listen } from '@tauri-apps/api/event';                         │
//! │                                                                          │
//! │  listen('card-swiped', (event) => {                                      │
//! │    // event.payload = { accountNumber, duplicate }                       │
//! │  });                                                                     │
//! │                                                                          │
//! │  listen('card-swipe-error', (event) => {                                 │
//! │    toast.error(event.payload.error);                                     │
//! │  });                                                                     │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```

use swipe_capture::{CaptureHandle, OutcomeSink};
use swipe_core::{CaptureOutcome, SWIPED_EVENT, SWIPE_ERROR_EVENT};
use tauri::{AppHandle, Emitter};
use tracing::{debug, error};

/// Capture state managed by Tauri.
///
/// The controller owns the session; this only keeps a way to talk to it.
pub struct CaptureState {
    handle: CaptureHandle,
}

impl CaptureState {
    /// Wraps a running controller.
    pub fn new(handle: CaptureHandle) -> Self {
        CaptureState { handle }
    }

    /// Handle to the controller task.
    pub fn handle(&self) -> &CaptureHandle {
        &self.handle
    }
}

/// Tauri-based outcome sink.
///
/// Implements [`OutcomeSink`] by emitting window events the frontend
/// listens to.
#[derive(Clone)]
pub struct TauriOutcomeSink {
    app_handle: AppHandle,
}

impl TauriOutcomeSink {
    /// Creates a new TauriOutcomeSink.
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl OutcomeSink for TauriOutcomeSink {
    fn emit(&self, outcome: &CaptureOutcome) {
        let result = match outcome {
            CaptureOutcome::Swiped(event) => self.app_handle.emit(SWIPED_EVENT, event),
            CaptureOutcome::SwipeError(event) => self.app_handle.emit(SWIPE_ERROR_EVENT, event),
        };

        if let Err(e) = result {
            error!(?e, event = outcome.event_name(), "Failed to emit capture event");
            return;
        }

        debug!(
            event = outcome.event_name(),
            account_number = outcome.account_number(),
            "Emitted capture event"
        );
    }
}
