//! # swipe-capture: Capture Controller for Swipe Ledger
//!
//! This crate turns a stream of keyboard events into recorded swipes. It
//! runs the capture session as a single tokio task so that start, stop and
//! key events are strictly ordered.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Swipe Ledger Capture Layer                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   swipe-capture (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────────┐  ┌─────────────┐  ┌─────────────────────┐ │   │
//! │  │  │CaptureController│  │ OutcomeSink │  │ CaptureConfig       │ │   │
//! │  │  │(controller.rs)  │  │ (sink.rs)   │  │ (config.rs)         │ │   │
//! │  │  │                 │  │             │  │                     │ │   │
//! │  │  │ Session, timer, │─►│ Tauri event │  │ swipe timeout       │ │   │
//! │  │  │ decode, append  │  │ or channel  │  │ SWIPE_TIMEOUT_MS    │ │   │
//! │  │  └─────────────────┘  └─────────────┘  └─────────────────────┘ │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  DEPENDENCIES:                                                         │
//! │  • swipe-core: aggregator, decoder, outcome types                      │
//! │  • swipe-ledger: RecordStore (blocking, run via spawn_blocking)        │
//! │                                                                         │
//! │  EVENTS (to Tauri):                                                    │
//! │  • "card-swiped"      - { accountNumber, duplicate }                   │
//! │  • "card-swipe-error" - { error, kind, accountNumber?, data? }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`controller`] - The controller task and its [`CaptureHandle`]
//! - [`sink`] - Outcome delivery ([`OutcomeSink`])
//! - [`config`] - Capture tuning
//! - [`error`] - Capture error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swipe_capture::{CaptureConfig, CaptureController};
//!
//! let controller = CaptureController::new(CaptureConfig::from_env()?, ledger, sink);
//! let capture = controller.spawn();
//!
//! capture.start().await?;
//! // forward every keydown from the UI
//! capture.on_raw_input(key).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod controller;
pub mod error;
pub mod sink;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CaptureConfig;
pub use controller::{CaptureController, CaptureHandle, CaptureStatus};
pub use error::{CaptureError, CaptureResult};
pub use sink::{ChannelSink, NoOpSink, OutcomeSink};
