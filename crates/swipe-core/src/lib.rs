//! # swipe-core: Pure Swipe Logic for Swipe Ledger
//!
//! This crate is the **heart** of Swipe Ledger. It turns keystrokes from a
//! keyboard-emulating magnetic card reader into account numbers, and defines
//! the records and ordering rules of the ledger. It has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Swipe Ledger Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (webview)                           │   │
//! │  │    keydown ──► submit_key_input      listen('card-swiped')     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Tauri IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 swipe-capture (controller actor)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ swipe-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  decoder  │  │ aggregator│  │ ordering  │  │ validation│  │   │
//! │  │   │ Track 1/2 │  │ SwipeBuf  │  │ natural   │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO FILES • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 swipe-ledger (flat-file ledger)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (AccountRecord, ColumnConfig, KeyInput, outcomes)
//! - [`decoder`] - Track 1 / Track 2 account number extraction
//! - [`aggregator`] - Keystroke buffering with an explicit deadline
//! - [`ordering`] - Numeric-aware comparison for ledger sorting
//! - [`error`] - Domain error types and the stable [`ErrorKind`]
//! - [`validation`] - Operator input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use swipe_core::decoder::decode;
//!
//! let account = decode(";5022440200591308625=391200018130?").unwrap();
//! assert_eq!(account, "5022440200591308625");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod decoder;
pub mod error;
pub mod ordering;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use swipe_core::ColumnConfig` instead of
// `use swipe_core::types::ColumnConfig`

pub use aggregator::{KeyAction, SwipeAggregator, DEFAULT_SWIPE_TIMEOUT};
pub use decoder::{decode, DecodedSwipe, TrackFormat};
pub use error::{DecodeFailure, ErrorKind, ValidationError};
pub use types::*;
