//! # Swipe Ledger Desktop Library
//!
//! Core library for the Swipe Ledger desktop application.
//! This is the main entry point that configures and runs the Tauri app.
//!
//! ## Module Organization
//! ```text
//! swipe_desktop_lib/
//! ├── lib.rs          ◄─── You are here (Tauri setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── Shared CsvLedger
//! │   └── capture.rs  ◄─── Controller handle + Tauri event sink
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── capture.rs  ◄─── Capture session commands
//! │   ├── ledger.rs   ◄─── Ledger file commands
//! │   └── config.rs   ◄─── Column configuration commands
//! └── error.rs        ◄─── API error and response envelope
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use swipe_capture::{CaptureConfig, CaptureController, CaptureError, CaptureHandle};
use swipe_ledger::{CsvLedger, LedgerSettings, SettingsStore};
use tauri::{Manager, RunEvent};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use state::{CaptureState, LedgerState, TauriOutcomeSink};

/// Reasons the app can fail to start.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO (DEBUG for swipe crates), override with RUST_LOG    │
/// │                                                                         │
/// │  2. Load Settings ────────────────────────────────────────────────────► │
/// │     • settings.toml in the platform config dir (or SWIPE_SETTINGS_PATH) │
/// │     • Unreadable file: warn and use defaults                            │
/// │                                                                         │
/// │  3. Open Ledger ──────────────────────────────────────────────────────► │
/// │     • Configured directory, else the app data dir                       │
/// │                                                                         │
/// │  4. Spawn Capture Controller ─────────────────────────────────────────► │
/// │     • Outcomes emitted as card-swiped / card-swipe-error                │
/// │                                                                         │
/// │  5. Build & Run Tauri App ────────────────────────────────────────────► │
/// │     • Register plugins and commands                                     │
/// │     • Manage state                                                      │
/// │     • Shut the controller down on exit                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    // Initialize tracing (logging)
    init_tracing();

    info!("Starting Swipe Ledger Desktop Application");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        // Setup hook runs before the app starts
        .setup(|app| {
            let settings = Arc::new(SettingsStore::load_or_default(None));
            let fallback_dir = ledger_fallback_dir()?;
            info!(?fallback_dir, settings = ?settings.path(), "Ledger locations determined");

            let ledger = Arc::new(CsvLedger::new(settings, fallback_dir));
            info!(path = %ledger.ledger_path().display(), "Ledger ready");

            let config = CaptureConfig::from_env().map_err(SetupError::from)?;
            let sink = Arc::new(TauriOutcomeSink::new(app.handle().clone()));
            let controller = CaptureController::new(config, ledger.clone(), sink);

            // spawn() needs a runtime context
            let capture = tauri::async_runtime::block_on(async move { controller.spawn() });

            app.manage(LedgerState::new(ledger));
            app.manage(CaptureState::new(capture));

            info!("State initialized");
            Ok(())
        })
        // Register all commands
        .invoke_handler(tauri::generate_handler![
            // Capture commands
            commands::capture::start_capture,
            commands::capture::stop_capture,
            commands::capture::submit_key_input,
            commands::capture::get_capture_status,
            commands::capture::write_record,
            // Ledger commands
            commands::ledger::get_ledger_path,
            commands::ledger::get_ledger_directory,
            commands::ledger::select_ledger_directory,
            commands::ledger::open_ledger_file,
            commands::ledger::deduplicate_ledger,
            commands::ledger::get_records,
            commands::ledger::get_record_count,
            commands::ledger::update_record_field,
            // Config commands
            commands::config::get_column_config,
            commands::config::save_column_config,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app, event| {
            if let RunEvent::Exit = event {
                let capture = app.state::<CaptureState>().handle().clone();
                shutdown_capture(capture);
            }
        });
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=swipe_capture=trace` - Trace the capture controller only
/// - Default: INFO, DEBUG for swipe crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,swipe=debug,swipe_desktop_lib=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Directory used when no ledger directory is configured.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.swipeledger.swipe-ledger/`
/// - **Windows**: `%APPDATA%\swipeledger\swipe-ledger\data\`
/// - **Linux**: `~/.local/share/swipe-ledger/`
fn ledger_fallback_dir() -> Result<PathBuf, SetupError> {
    let dir = LedgerSettings::default_data_dir().ok_or(SetupError::NoDataDir)?;

    std::fs::create_dir_all(&dir).map_err(|source| SetupError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    Ok(dir)
}

fn shutdown_capture(capture: CaptureHandle) {
    tauri::async_runtime::block_on(async move {
        if let Err(e) = capture.shutdown().await {
            error!(error = %e, "Capture controller did not shut down cleanly");
        }
    });
}
