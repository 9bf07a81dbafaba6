//! # Capture Controller
//!
//! Owns the capture session: routes key events into the swipe aggregator,
//! decodes completed payloads, writes them to the ledger and emits exactly
//! one outcome per swipe.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Capture Controller (one task)                       │
//! │                                                                         │
//! │  CaptureHandle (clone per caller)                                      │
//! │    start / stop / on_raw_input / write_record / status                 │
//! │       │                                                                 │
//! │       │ mpsc (bounded)                                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  loop { select! {                                                │   │
//! │  │      sleep_until(deadline) ──► poll aggregator ──► payload       │   │
//! │  │      cmd_rx.recv()         ──► handle command                    │   │
//! │  │  } }                                                             │   │
//! │  └──────────────────────────────┬──────────────────────────────────┘   │
//! │                                 │ payload                               │
//! │                                 ▼                                       │
//! │   decode ──fail──► SwipeError { kind: DECODE_FAILURE, data }           │
//! │     │                                                                   │
//! │     ok                                                                  │
//! │     ▼                                                                   │
//! │   spawn_blocking(store.append) ── awaited before the next command      │
//! │     │                                                                   │
//! │     ├──ok──► Swiped { accountNumber, duplicate }                       │
//! │     └─err──► SwipeError { kind: STORAGE_*, accountNumber }             │
//! │                                                                         │
//! │   OutcomeSink::emit(outcome)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because one task handles every command and awaits each ledger write,
//! swipes are recorded in the order they were completed and a stop can
//! never interleave with a half-processed swipe.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use swipe_core::aggregator::{KeyAction, SwipeAggregator};
use swipe_core::decoder::decode_detailed;
use swipe_core::validation::validate_account_number;
use swipe_core::{
    AccountRecord, CaptureOutcome, ErrorKind, KeyInput, SwipeErrorEvent, SwipedEvent,
};
use swipe_ledger::{AppendOutcome, RecordStore};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::sink::OutcomeSink;

// =============================================================================
// Status
// =============================================================================

/// Snapshot of the capture session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureStatus {
    /// True between `start` and `stop`.
    pub active: bool,
    /// Id of the current session, if active.
    pub session_id: Option<Uuid>,
    /// When the current session started, if active.
    pub started_at: Option<DateTime<Utc>>,
    /// Characters of a swipe still being assembled.
    pub buffered_chars: usize,
}

#[derive(Debug, Clone, Copy)]
struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
}

// =============================================================================
// Handle
// =============================================================================

/// Commands for the controller task.
#[derive(Debug)]
enum CaptureCommand {
    Start {
        reply: oneshot::Sender<CaptureStatus>,
    },
    Stop {
        reply: oneshot::Sender<CaptureStatus>,
    },
    RawInput(KeyInput),
    WriteRecord {
        account_number: String,
        reply: oneshot::Sender<CaptureResult<AppendOutcome>>,
    },
    Status {
        reply: oneshot::Sender<CaptureStatus>,
    },
    Shutdown,
}

/// Cloneable handle for driving the controller.
#[derive(Debug, Clone)]
pub struct CaptureHandle {
    cmd_tx: mpsc::Sender<CaptureCommand>,
}

impl CaptureHandle {
    /// Activates capture. Calling it while active keeps the current session.
    pub async fn start(&self) -> CaptureResult<CaptureStatus> {
        self.request(|reply| CaptureCommand::Start { reply }).await
    }

    /// Deactivates capture and discards any partial swipe.
    pub async fn stop(&self) -> CaptureResult<CaptureStatus> {
        self.request(|reply| CaptureCommand::Stop { reply }).await
    }

    /// Feeds one raw key event. Ignored while capture is inactive.
    pub async fn on_raw_input(&self, input: KeyInput) -> CaptureResult<()> {
        self.send(CaptureCommand::RawInput(input)).await
    }

    /// Records a manually entered account number.
    ///
    /// Same ledger semantics as a decoded swipe, but the outcome is returned
    /// to the caller instead of emitted. Works whether or not capture is
    /// active.
    pub async fn write_record(
        &self,
        account_number: impl Into<String>,
    ) -> CaptureResult<AppendOutcome> {
        let account_number = account_number.into();
        self.request(|reply| CaptureCommand::WriteRecord {
            account_number,
            reply,
        })
        .await?
    }

    /// Returns the current session state.
    pub async fn status(&self) -> CaptureResult<CaptureStatus> {
        self.request(|reply| CaptureCommand::Status { reply }).await
    }

    /// Stops the controller task. A partial swipe is discarded.
    pub async fn shutdown(&self) -> CaptureResult<()> {
        self.send(CaptureCommand::Shutdown).await
    }

    async fn send(&self, cmd: CaptureCommand) -> CaptureResult<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| CaptureError::ChannelError("Capture controller channel closed".into()))
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> CaptureCommand,
    ) -> CaptureResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(make(reply_tx)).await?;
        reply_rx
            .await
            .map_err(|_| CaptureError::ChannelError("Capture controller dropped the request".into()))
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Single owner of capture state.
///
/// ## Usage
/// ```rust,ignore
/// let controller = CaptureController::new(CaptureConfig::default(), ledger, sink);
/// let handle = controller.spawn();
///
/// handle.start().await?;
/// handle.on_raw_input(KeyInput::with_char(";")).await?;
/// ```
pub struct CaptureController {
    config: CaptureConfig,
    store: Arc<dyn RecordStore>,
    sink: Arc<dyn OutcomeSink>,
    aggregator: SwipeAggregator,
    session: Option<Session>,
}

impl CaptureController {
    /// Creates an inactive controller.
    pub fn new(
        config: CaptureConfig,
        store: Arc<dyn RecordStore>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        CaptureController {
            aggregator: SwipeAggregator::new(config.swipe_timeout),
            config,
            store,
            sink,
            session: None,
        }
    }

    /// Spawns the controller task and returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> CaptureHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(self.config.command_buffer);

        tokio::spawn(async move {
            self.run(cmd_rx).await;
        });

        CaptureHandle { cmd_tx }
    }

    /// Main controller loop.
    async fn run(mut self, mut cmd_rx: mpsc::Receiver<CaptureCommand>) {
        info!(timeout = ?self.config.swipe_timeout, "Capture controller started");

        loop {
            let deadline = self.aggregator.deadline().map(Instant::from_std);

            tokio::select! {
                // An expired deadline is handled before any queued command,
                // so keys typed after the quiet period start a new swipe.
                biased;

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_deadline().await;
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(CaptureCommand::Shutdown) | None => {
                            info!("Capture controller shutting down");
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd).await,
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, cmd: CaptureCommand) {
        match cmd {
            CaptureCommand::Start { reply } => {
                self.start();
                let _ = reply.send(self.status());
            }
            CaptureCommand::Stop { reply } => {
                self.stop();
                let _ = reply.send(self.status());
            }
            CaptureCommand::RawInput(input) => self.on_raw_input(&input),
            CaptureCommand::WriteRecord {
                account_number,
                reply,
            } => {
                let result = self.write_record(&account_number).await;
                let _ = reply.send(result);
            }
            CaptureCommand::Status { reply } => {
                let _ = reply.send(self.status());
            }
            CaptureCommand::Shutdown => {}
        }
    }

    fn start(&mut self) {
        if let Some(session) = &self.session {
            debug!(session_id = %session.id, "Capture already active");
            return;
        }

        self.aggregator.reset();
        let session = Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        };
        info!(session_id = %session.id, "Swipe capture started");
        self.session = Some(session);
    }

    fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            debug!("Capture already inactive");
            return;
        };

        let discarded = self.aggregator.reset();
        if discarded > 0 {
            debug!(discarded, "Discarded partial swipe");
        }
        info!(session_id = %session.id, "Swipe capture stopped");
    }

    fn on_raw_input(&mut self, input: &KeyInput) {
        if self.session.is_none() {
            debug!(key = %input.key, "Ignoring key input while capture is inactive");
            return;
        }

        match self.aggregator.feed(input, Instant::now().into_std()) {
            KeyAction::Char(_) | KeyAction::Backspace => {
                debug!(buffered = self.aggregator.buffered_chars(), "Swipe buffer updated");
            }
            KeyAction::Ignore => debug!(key = %input.key, "Key ignored"),
        }
    }

    fn status(&self) -> CaptureStatus {
        CaptureStatus {
            active: self.session.is_some(),
            session_id: self.session.map(|s| s.id),
            started_at: self.session.map(|s| s.started_at),
            buffered_chars: self.aggregator.buffered_chars(),
        }
    }

    async fn on_deadline(&mut self) {
        match self.aggregator.poll(Instant::now().into_std()) {
            Some(payload) => {
                let outcome = self.process_payload(&payload).await;
                self.sink.emit(&outcome);
            }
            None => debug!("Swipe deadline passed with an empty buffer"),
        }
    }

    /// Turns one completed payload into exactly one outcome.
    async fn process_payload(&self, payload: &str) -> CaptureOutcome {
        let swipe = match decode_detailed(payload) {
            Ok(swipe) => swipe,
            Err(failure) => {
                warn!(preview = %failure.preview(), "Swipe could not be decoded");
                return CaptureOutcome::SwipeError(SwipeErrorEvent {
                    error: failure.to_string(),
                    kind: ErrorKind::DecodeFailure,
                    account_number: None,
                    data: Some(failure.preview().to_string()),
                });
            }
        };

        debug!(format = %swipe.format, "Swipe decoded");
        let account_number = swipe.account_number;

        match self.append(account_number.clone()).await {
            Ok(result) => {
                info!(
                    account = %result.account_number,
                    duplicate = result.duplicate,
                    "Card swiped"
                );
                CaptureOutcome::Swiped(SwipedEvent {
                    account_number: result.account_number,
                    duplicate: result.duplicate,
                })
            }
            Err(e) => {
                error!(account = %account_number, error = %e, "Failed to record swipe");
                CaptureOutcome::SwipeError(SwipeErrorEvent {
                    error: e.user_message(),
                    kind: e.kind(),
                    account_number: Some(account_number),
                    data: None,
                })
            }
        }
    }

    async fn write_record(&self, account_number: &str) -> CaptureResult<AppendOutcome> {
        let account_number = validate_account_number(account_number)?;
        let outcome = self.append(account_number).await?;
        info!(
            account = %outcome.account_number,
            duplicate = outcome.duplicate,
            "Manual entry recorded"
        );
        Ok(outcome)
    }

    async fn append(&self, account_number: String) -> CaptureResult<AppendOutcome> {
        let store = Arc::clone(&self.store);
        let outcome =
            tokio::task::spawn_blocking(move || store.append(AccountRecord::new(account_number)))
                .await??;
        Ok(outcome)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
