//! # Swipe Ledger Desktop Application Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Swipe Ledger Desktop                             │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Tauri WebView                               │  │
//! │  │  • Capture toggle      • Ledger table                            │  │
//! │  │  • Swipe notifications • Column settings                         │  │
//! │  │                              │                                   │  │
//! │  │              keydown ──► invoke('submit_key_input')              │  │
//! │  │              listen('card-swiped' | 'card-swipe-error')          │  │
//! │  └──────────────────────────────┼───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► Logging, settings, ledger, controller, commands  │  │
//! │  │  commands/ ──► start_capture, write_record, get_records, ...    │  │
//! │  │  state/ ─────► LedgerState, CaptureState                        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  giftcards.csv (sorted, deduplicated, atomically rewritten)      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// Prevents an additional console window on Windows in release
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

fn main() {
    // The actual setup is in lib.rs for better testability
    swipe_desktop_lib::run();
}
