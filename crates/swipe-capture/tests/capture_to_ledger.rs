//! End-to-end: key events through the controller into a real ledger file.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use swipe_capture::{CaptureConfig, CaptureController, CaptureHandle, ChannelSink};
use swipe_core::{CaptureOutcome, KeyInput};
use swipe_ledger::{CsvLedger, LedgerSettings, RecordStore, SettingsStore};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

struct Harness {
    _dir: TempDir,
    ledger: Arc<CsvLedger>,
    capture: CaptureHandle,
    outcomes: UnboundedReceiver<CaptureOutcome>,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let settings = Arc::new(SettingsStore::in_memory(LedgerSettings::default()));
    let ledger = Arc::new(CsvLedger::new(settings, dir.path()));
    let (sink, outcomes) = ChannelSink::new();

    let capture =
        CaptureController::new(CaptureConfig::default(), ledger.clone(), Arc::new(sink)).spawn();

    Harness {
        _dir: dir,
        ledger,
        capture,
        outcomes,
    }
}

/// Types a payload the way a US-layout reader does: sentinels as shifted
/// digit keys, everything else as plain keys.
async fn swipe(capture: &CaptureHandle, payload: &str) {
    for c in payload.chars() {
        let input = match c {
            '%' => KeyInput::shifted("Digit5"),
            '^' => KeyInput::shifted("Digit6"),
            '?' => KeyInput::shifted("Slash"),
            other => KeyInput::key(other.to_string()),
        };
        capture.on_raw_input(input).await.unwrap();
    }
    capture.on_raw_input(KeyInput::key("Shift")).await.unwrap();
    // Every key must be stamped before the clock moves.
    capture.status().await.unwrap();
    tokio::time::advance(Duration::from_millis(600)).await;
    capture.status().await.unwrap();
}

fn ledger_text(ledger: &CsvLedger) -> String {
    std::fs::read_to_string(ledger.ledger_path()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn swipes_are_written_sorted_and_deduplicated() {
    let mut h = harness();
    h.capture.start().await.unwrap();

    swipe(
        &h.capture,
        "%B5022440200591308625^HEARTLAND GIFT^391200018130?;5022440200591308625=391200018130?",
    )
    .await;
    swipe(&h.capture, ";2130000000100080999?").await;
    swipe(&h.capture, ";5022440200591308625=391200018130?").await;

    let events: Vec<_> = std::iter::from_fn(|| h.outcomes.try_recv().ok())
        .map(|outcome| match outcome {
            CaptureOutcome::Swiped(e) => json!(e),
            CaptureOutcome::SwipeError(e) => json!(e),
        })
        .collect();

    assert_eq!(
        events,
        vec![
            json!({ "accountNumber": "5022440200591308625", "duplicate": false }),
            json!({ "accountNumber": "2130000000100080999", "duplicate": false }),
            json!({ "accountNumber": "5022440200591308625", "duplicate": true }),
        ]
    );

    assert_eq!(
        ledger_text(&h.ledger),
        "account_number,amount,activated\n\
         2130000000100080999,0,Y\n\
         5022440200591308625,0,Y\n"
    );
}

#[tokio::test(start_paused = true)]
async fn undecodable_swipe_leaves_ledger_untouched() {
    let mut h = harness();
    h.capture.start().await.unwrap();

    swipe(&h.capture, "E?").await;

    match h.outcomes.try_recv().unwrap() {
        CaptureOutcome::SwipeError(event) => {
            assert_eq!(
                json!(event),
                json!({
                    "error": "Failed to extract account number from swipe data",
                    "kind": "DECODE_FAILURE",
                    "data": "E?...",
                })
            );
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(!h.ledger.ledger_path().exists());
    assert!(h.capture.status().await.unwrap().active);
}

#[tokio::test(start_paused = true)]
async fn manual_entry_shares_the_ledger() {
    let mut h = harness();

    let outcome = h.capture.write_record("10").await.unwrap();
    assert!(!outcome.duplicate);

    h.capture.start().await.unwrap();
    swipe(&h.capture, ";9?").await;
    assert!(h.outcomes.try_recv().is_ok());

    assert!(h.capture.write_record("9").await.unwrap().duplicate);
    assert_eq!(h.ledger.load().unwrap().len(), 2);
    assert_eq!(
        ledger_text(&h.ledger),
        "account_number,amount,activated\n9,0,Y\n10,0,Y\n"
    );
}
