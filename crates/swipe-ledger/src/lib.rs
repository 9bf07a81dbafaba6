//! # swipe-ledger: Flat-File Ledger for Swipe Ledger
//!
//! This crate persists captured account numbers to a plain comma-separated
//! file that operators open in a spreadsheet, and stores the settings that
//! describe that file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Swipe Ledger Data Flow                            │
//! │                                                                         │
//! │  swipe-capture (decoded swipe) / Tauri command (manual entry)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   swipe-ledger (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CsvLedger   │    │    format     │    │   settings   │  │   │
//! │  │   │  (store.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ parse/render  │    │ settings.toml│  │   │
//! │  │   │ append        │───►│ Lenient /     │    │ ColumnConfig │  │   │
//! │  │   │ upsert_sorted │    │ Strict        │    │ ledger dir   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     giftcards.csv                               │   │
//! │  │   <ledger dir>/giftcards.csv, or the app data dir               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`RecordStore`] trait and its file-backed [`CsvLedger`]
//! - [`format`] - Ledger text parsing and rendering
//! - [`settings`] - Persisted settings (`settings.toml`)
//! - [`error`] - Ledger error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use swipe_ledger::{CsvLedger, RecordStore, SettingsStore};
//!
//! let settings = Arc::new(SettingsStore::load(None)?);
//! let ledger = CsvLedger::new(settings, app_data_dir);
//!
//! let outcome = ledger.append(AccountRecord::new("5022440200591308625"))?;
//! if outcome.duplicate {
//!     // already captured, file untouched
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod settings;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult};
pub use format::LoadMode;
pub use settings::{LedgerSettings, SettingsStore};
pub use store::{AppendOutcome, CsvLedger, RecordStore, LEDGER_FILE_NAME};
