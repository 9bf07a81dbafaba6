//! # Tauri Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── capture.rs  ◄─── Capture session, key forwarding, manual entry
//! ├── ledger.rs   ◄─── Ledger location, dedup, browsing, editing
//! └── config.rs   ◄─── Column configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tauri Command Flow                                   │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  import { invoke } from '@tauri-apps/api/core';                         │
//! │                                                                         │
//! │  const res = await invoke('get_records', { page: 0, pageSize: 50 });    │
//! │         │                                                               │
//! │         │ (IPC via WebView)                                             │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  #[tauri::command]                                                      │
//! │  async fn get_records(                                                  │
//! │      ledger: State<'_, LedgerState>,  ◄── Injected by Tauri            │
//! │      page: Option<u32>,               ◄── From invoke params           │
//! │      page_size: Option<u32>,          ◄── camelCase in JS              │
//! │  ) -> CommandResult<RecordPage>                                         │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Frontend receives: { success, records, total, page, pageSize }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod capture;
pub mod config;
pub mod ledger;
