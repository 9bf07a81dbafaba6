//! # Outcome Sinks
//!
//! Where the controller delivers swipe outcomes.
//!
//! ```text
//!   CaptureController ──► OutcomeSink::emit(&CaptureOutcome)
//!                              │
//!            ┌─────────────────┼──────────────────────┐
//!            ▼                 ▼                      ▼
//!   TauriOutcomeSink      ChannelSink              NoOpSink
//!   (desktop app:         (tests, embedding)       (headless)
//!    "card-swiped",
//!    "card-swipe-error")
//! ```

use swipe_core::CaptureOutcome;
use tokio::sync::mpsc;
use tracing::warn;

/// Receives one call per completed swipe.
///
/// Called from the controller task; implementations must not block.
pub trait OutcomeSink: Send + Sync {
    /// Delivers an outcome.
    fn emit(&self, outcome: &CaptureOutcome);
}

/// Sink that drops every outcome.
pub struct NoOpSink;

impl OutcomeSink for NoOpSink {
    fn emit(&self, _outcome: &CaptureOutcome) {}
}

/// Sink that forwards outcomes into an unbounded channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<CaptureOutcome>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its outcomes arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<CaptureOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

impl OutcomeSink for ChannelSink {
    fn emit(&self, outcome: &CaptureOutcome) {
        if self.tx.send(outcome.clone()).is_err() {
            warn!(event = outcome.event_name(), "Outcome receiver dropped");
        }
    }
}
