//! # Ledger State
//!
//! Shared access to the CSV ledger for commands.
//!
//! Ledger operations are blocking file I/O, so commands go through
//! [`LedgerState::run`], which moves the work onto the blocking pool.

use std::sync::Arc;

use swipe_ledger::{CsvLedger, LedgerResult};

use crate::error::ApiError;

/// Ledger state managed by Tauri.
///
/// ## Thread Safety
/// [`CsvLedger`] serializes its own read-modify-write cycles, so the
/// capture controller and commands can share one instance.
pub struct LedgerState {
    ledger: Arc<CsvLedger>,
}

impl LedgerState {
    /// Wraps a ledger.
    pub fn new(ledger: Arc<CsvLedger>) -> Self {
        LedgerState { ledger }
    }

    /// The shared ledger.
    pub fn ledger(&self) -> &Arc<CsvLedger> {
        &self.ledger
    }

    /// Runs a ledger operation on the blocking pool.
    ///
    /// The outer `Err` means the task itself failed; the operation's own
    /// result is returned untouched.
    pub async fn run<T, F>(&self, op: F) -> Result<LedgerResult<T>, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&CsvLedger) -> LedgerResult<T> + Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);
        tauri::async_runtime::spawn_blocking(move || op(&ledger))
            .await
            .map_err(|e| ApiError::internal(format!("Ledger task failed: {e}")))
    }
}
