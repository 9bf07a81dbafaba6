//! # Ledger Settings
//!
//! Persistent settings for the ledger: where it lives, what its header
//! says and how strictly it is parsed.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SWIPE_LEDGER_DIR=/srv/cards                                        │
//! │     SWIPE_LOAD_MODE=strict                                             │
//! │     SWIPE_SETTINGS_PATH=/etc/swipe/settings.toml (file location)       │
//! │                                                                         │
//! │  2. TOML Settings File                                                 │
//! │     ~/.config/swipe-ledger/settings.toml (Linux)                       │
//! │     ~/Library/Application Support/com.swipeledger.swipe-ledger/ (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     app data dir, account_number/amount/activated, lenient             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! # settings.toml
//! ledger_directory = "/home/clerk/Documents/cards"
//! load_mode = "lenient"  # lenient | strict
//!
//! [columns]
//! accountNumber = "acct"
//! amount = "amt"
//! activated = "act"
//! extra = ["note"]
//! ```

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use swipe_core::validation::validate_column_config;
use swipe_core::ColumnConfig;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::format::LoadMode;

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Environment variable overriding the settings file location.
pub const ENV_SETTINGS_PATH: &str = "SWIPE_SETTINGS_PATH";

/// Environment variable overriding the ledger directory.
pub const ENV_LEDGER_DIR: &str = "SWIPE_LEDGER_DIR";

/// Environment variable overriding the load mode.
pub const ENV_LOAD_MODE: &str = "SWIPE_LOAD_MODE";

// =============================================================================
// Ledger Settings
// =============================================================================

/// Persisted ledger settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSettings {
    /// Directory holding the ledger file. `None` means the app data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_directory: Option<PathBuf>,

    /// Malformed line handling.
    #[serde(default)]
    pub load_mode: LoadMode,

    /// Header text for each column.
    #[serde(default)]
    pub columns: ColumnConfig,
}

impl LedgerSettings {
    /// Validates the settings and returns a normalized copy.
    pub fn validate(&self) -> LedgerResult<Self> {
        if let Some(dir) = &self.ledger_directory {
            if dir.as_os_str().is_empty() {
                return Err(LedgerError::SettingsLoadFailed(
                    "ledger_directory must not be empty".into(),
                ));
            }
        }

        Ok(LedgerSettings {
            ledger_directory: self.ledger_directory.clone(),
            load_mode: self.load_mode,
            columns: validate_column_config(&self.columns)?,
        })
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(ENV_LEDGER_DIR) {
            if !dir.trim().is_empty() {
                debug!(dir = %dir, "Overriding ledger directory from environment");
                self.ledger_directory = Some(PathBuf::from(dir));
            }
        }

        if let Ok(mode) = std::env::var(ENV_LOAD_MODE) {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding load mode from environment");
                    self.load_mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown load mode in environment"),
            }
        }
    }

    /// Returns the default settings file path.
    ///
    /// `SWIPE_SETTINGS_PATH` wins over the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_SETTINGS_PATH) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        directories::ProjectDirs::from("com", "swipeledger", "swipe-ledger")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    /// Returns the platform data directory used when no ledger directory
    /// is configured.
    pub fn default_data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "swipeledger", "swipe-ledger")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }
}

fn read_file(path: &Path) -> LedgerResult<Option<LedgerSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| LedgerError::from_io(e, path))?;
    Ok(Some(toml::from_str(&contents)?))
}

fn write_file(path: &Path, settings: &LedgerSettings) -> LedgerResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LedgerError::from_io(e, parent))?;
    }
    let contents = toml::to_string_pretty(settings)?;
    std::fs::write(path, contents).map_err(|e| LedgerError::from_io(e, path))?;
    Ok(())
}

// =============================================================================
// Settings Store
// =============================================================================

/// Shared, persisted settings.
///
/// Holds the effective settings (file plus environment overrides) in
/// memory. Updates are applied to the in-memory value and merged into the
/// file on disk, so environment overrides are never written back.
#[derive(Debug)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    current: RwLock<LedgerSettings>,
}

impl SettingsStore {
    /// Loads settings: defaults → file → environment → validation.
    ///
    /// `path` defaults to [`LedgerSettings::default_path`].
    pub fn load(path: Option<PathBuf>) -> LedgerResult<Self> {
        let path = path.or_else(LedgerSettings::default_path);
        let mut settings = LedgerSettings::default();

        if let Some(path) = &path {
            match read_file(path)? {
                Some(from_file) => {
                    info!(?path, "Loading ledger settings from file");
                    settings = from_file;
                }
                None => debug!(?path, "Settings file not found, using defaults"),
            }
        }

        settings.apply_env_overrides();
        let settings = settings.validate()?;

        Ok(SettingsStore {
            path,
            current: RwLock::new(settings),
        })
    }

    /// Loads settings or falls back to defaults if loading fails.
    pub fn load_or_default(path: Option<PathBuf>) -> Self {
        let path = path.or_else(LedgerSettings::default_path);
        Self::load(path.clone()).unwrap_or_else(|e| {
            warn!("Failed to load ledger settings: {}. Using defaults.", e);
            SettingsStore {
                path,
                current: RwLock::new(LedgerSettings::default()),
            }
        })
    }

    /// Creates a store that never touches the filesystem.
    pub fn in_memory(settings: LedgerSettings) -> Self {
        SettingsStore {
            path: None,
            current: RwLock::new(settings),
        }
    }

    /// Location of the settings file, if persisted.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns a snapshot of the current settings.
    pub fn get(&self) -> LedgerSettings {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Applies `change`, validates, persists and returns the new settings.
    ///
    /// The change is applied twice: to the effective settings and to the
    /// file contents, so unrelated keys on disk survive.
    pub fn update<F>(&self, change: F) -> LedgerResult<LedgerSettings>
    where
        F: Fn(&mut LedgerSettings),
    {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut next = current.clone();
        change(&mut next);
        let next = next.validate()?;

        if let Some(path) = &self.path {
            let mut on_disk = read_file(path)?.unwrap_or_default();
            change(&mut on_disk);
            write_file(path, &on_disk.validate()?)?;
            info!(?path, "Ledger settings saved");
        }

        *current = next.clone();
        Ok(next)
    }
}
