//! # State Module
//!
//! Manages application state for the Tauri desktop app.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Tauri Runtime                              │   │
//! │  │  app.manage(ledger_state);                                      │   │
//! │  │  app.manage(capture_state);                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                          │
//! │               ▼                             ▼                           │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────┐        │
//! │  │      LedgerState         │  │      CaptureState            │        │
//! │  │                          │  │                              │        │
//! │  │  Arc<CsvLedger>          │  │  CaptureHandle ──► controller│        │
//! │  │  (shared with the        │  │  task (owns session, timer)  │        │
//! │  │   capture controller)    │  │                              │        │
//! │  └──────────────────────────┘  └──────────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: CsvLedger holds its own write lock                     │
//! │  • CaptureState: commands are messages; the task applies them in order │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod capture;
mod ledger;

pub use capture::{CaptureState, TauriOutcomeSink};
pub use ledger::LedgerState;
