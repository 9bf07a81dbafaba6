//! # Record Store
//!
//! The persisted, deduplicated, naturally sorted ledger of account records.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  append("123456")                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load() ── contains? ──yes──► AppendOutcome { duplicate: true }        │
//! │       │                       (file untouched)                         │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  upsert_sorted(records + new)                                           │
//! │       │  dedup (first wins) → natural sort → render                     │
//! │       ▼                                                                 │
//! │  giftcards.csv.XXXX (temp, same dir) ──rename──► giftcards.csv          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Read-modify-write sequences are serialized within the process by a
//! mutex. There is no cross-process file lock; two processes writing the
//! same ledger can lose updates.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use swipe_core::ordering::sort_natural_by;
use swipe_core::validation::{validate_account_number, validate_column_config, validate_field_value};
use swipe_core::{
    AccountRecord, ColumnConfig, DedupReport, RecordField, RecordPage, ValidationError,
};
use tracing::{debug, error, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::format::{self, ParsedLedger};
use crate::settings::{LedgerSettings, SettingsStore};

/// Name of the ledger file inside the ledger directory.
pub const LEDGER_FILE_NAME: &str = "giftcards.csv";

/// Result of appending one account number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendOutcome {
    pub account_number: String,
    /// True when the account number was already present; the ledger was
    /// not modified.
    pub duplicate: bool,
}

// =============================================================================
// Record Store Trait
// =============================================================================

/// Storage seam used by the capture controller.
///
/// Implementations are blocking; async callers should run them on a
/// blocking thread.
pub trait RecordStore: Send + Sync {
    /// Reads every record, in file order. A missing ledger is empty.
    fn load(&self) -> LedgerResult<Vec<AccountRecord>>;

    /// Re-reads storage and checks for an account number.
    fn contains(&self, account_number: &str) -> LedgerResult<bool> {
        let account_number = account_number.trim();
        Ok(self
            .load()?
            .iter()
            .any(|record| record.account_number == account_number))
    }

    /// Deduplicates (first occurrence wins), sorts and rewrites the
    /// ledger. Returns the number of records written.
    fn upsert_sorted(&self, records: Vec<AccountRecord>) -> LedgerResult<usize>;

    /// Adds a record unless its account number is already present.
    fn append(&self, record: AccountRecord) -> LedgerResult<AppendOutcome>;

    /// Current header mapping.
    fn column_config(&self) -> ColumnConfig;

    /// Replaces the header mapping and rewrites an existing ledger.
    fn set_column_config(&self, columns: ColumnConfig) -> LedgerResult<ColumnConfig>;
}

// =============================================================================
// CSV Ledger
// =============================================================================

/// File-backed [`RecordStore`].
///
/// ## Example
/// ```rust,no_run
/// use std::sync::Arc;
/// use swipe_core::AccountRecord;
/// use swipe_ledger::{CsvLedger, LedgerSettings, RecordStore, SettingsStore};
///
/// let settings = Arc::new(SettingsStore::in_memory(LedgerSettings::default()));
/// let ledger = CsvLedger::new(settings, "/var/lib/swipe");
/// let outcome = ledger.append(AccountRecord::new("123456"))?;
/// assert!(!outcome.duplicate);
/// # Ok::<(), swipe_ledger::LedgerError>(())
/// ```
#[derive(Debug)]
pub struct CsvLedger {
    settings: Arc<SettingsStore>,
    fallback_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLedger {
    /// Creates a ledger using `fallback_dir` whenever the configured
    /// directory is unset or does not exist.
    pub fn new(settings: Arc<SettingsStore>, fallback_dir: impl Into<PathBuf>) -> Self {
        CsvLedger {
            settings,
            fallback_dir: fallback_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Shared settings backing this ledger.
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Directory the ledger file lives in.
    pub fn ledger_directory(&self) -> PathBuf {
        resolve_directory(&self.settings.get(), &self.fallback_dir)
    }

    /// Full path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger_directory().join(LEDGER_FILE_NAME)
    }

    /// Points the ledger at another directory and persists the choice.
    ///
    /// The directory must already exist. Existing records are not moved.
    pub fn set_ledger_directory(&self, dir: impl AsRef<Path>) -> LedgerResult<PathBuf> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(LedgerError::PathMissing {
                path: dir.to_path_buf(),
            });
        }

        let _guard = self.lock();
        let chosen = dir.to_path_buf();
        self.settings
            .update(|s| s.ledger_directory = Some(chosen.clone()))?;

        let path = self.ledger_path();
        info!(path = %path.display(), "Ledger directory changed");
        Ok(path)
    }

    /// Removes duplicate account numbers and re-sorts the ledger.
    ///
    /// Fails with [`LedgerError::PathMissing`] if no ledger exists yet.
    pub fn deduplicate(&self) -> LedgerResult<DedupReport> {
        let _guard = self.lock();
        let path = self.ledger_path();
        if !path.exists() {
            return Err(LedgerError::PathMissing { path });
        }

        let records = self.load_unlocked()?;
        let original_count = records.len();
        let written = self.write_sorted(records)?;

        let report = DedupReport {
            duplicates_removed: count_u32(original_count - written),
            total_cards: count_u32(written),
            original_count: count_u32(original_count),
        };
        info!(
            removed = report.duplicates_removed,
            total = report.total_cards,
            "Ledger deduplicated"
        );
        Ok(report)
    }

    /// Edits one field of an existing record.
    ///
    /// `column` is either a header name or a role key (`amount`,
    /// `activated`). The account number column cannot be edited.
    pub fn update_field(
        &self,
        account_number: &str,
        column: &str,
        value: &str,
    ) -> LedgerResult<AccountRecord> {
        let columns = self.column_config();
        let field = columns
            .field(column)
            .ok_or_else(|| ValidationError::UnknownColumn(column.to_string()))?;
        if field == RecordField::AccountNumber {
            return Err(ValidationError::ReadOnlyColumn(column.to_string()).into());
        }

        let value = validate_field_value(column, value)?;
        if value.is_empty() && matches!(field, RecordField::Amount | RecordField::Activated) {
            return Err(ValidationError::Required {
                field: column.to_string(),
            }
            .into());
        }

        let _guard = self.lock();
        let account_number = account_number.trim();
        let mut records = self.load_unlocked()?;
        let record = records
            .iter_mut()
            .find(|r| r.account_number == account_number)
            .ok_or_else(|| LedgerError::RecordNotFound(account_number.to_string()))?;
        record.set(field, value);
        let updated = record.clone();

        self.write_sorted(records)?;
        info!(account = %account_number, column, "Ledger field updated");
        Ok(updated)
    }

    /// Returns one page of records in ledger order.
    ///
    /// `page` is zero-based; a zero `page_size` yields an empty page.
    pub fn page(&self, page: u32, page_size: u32) -> LedgerResult<RecordPage> {
        let records = self.load()?;
        let total = count_u32(records.len());
        let start = (page as usize).saturating_mul(page_size as usize);

        Ok(RecordPage {
            records: records
                .into_iter()
                .skip(start)
                .take(page_size as usize)
                .collect(),
            total,
            page,
            page_size,
        })
    }

    /// Number of records currently in the ledger.
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.load()?.len())
    }

    /// Creates a header-only ledger if none exists and returns its path.
    pub fn ensure_exists(&self) -> LedgerResult<PathBuf> {
        let _guard = self.lock();
        let path = self.ledger_path();
        if !path.exists() {
            self.write_sorted(Vec::new())?;
            info!(path = %path.display(), "Created empty ledger");
        }
        Ok(path)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(&self) -> LedgerResult<ParsedLedger> {
        let settings = self.settings.get();
        let path = resolve_directory(&settings, &self.fallback_dir).join(LEDGER_FILE_NAME);

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Ledger file not found, treating as empty");
                return Ok(ParsedLedger::default());
            }
            Err(e) => return Err(storage_error(e, &path)),
        };

        let parsed = format::parse(&contents, &settings.columns, settings.load_mode)?;
        if !parsed.header_matches(&settings.columns) {
            warn!(
                path = %path.display(),
                found = parsed.header.as_deref().unwrap_or_default(),
                expected = %settings.columns.header_line(),
                "Ledger header differs from configured columns; rows are read by position"
            );
        }
        Ok(parsed)
    }

    fn load_unlocked(&self) -> LedgerResult<Vec<AccountRecord>> {
        Ok(self.read()?.records)
    }

    /// Dedup, sort and write. Caller holds the write lock.
    fn write_sorted(&self, records: Vec<AccountRecord>) -> LedgerResult<usize> {
        let columns = self.settings.get().columns;
        self.write_sorted_as(records, &columns)
    }

    /// Like [`Self::write_sorted`], with an explicit header.
    fn write_sorted_as(&self, records: Vec<AccountRecord>, columns: &ColumnConfig) -> LedgerResult<usize> {
        let settings = self.settings.get();
        let mut unique = dedup_first_wins(records);
        sort_natural_by(&mut unique, |r| r.account_number.as_str());

        let dir = resolve_directory(&settings, &self.fallback_dir);
        if dir == self.fallback_dir {
            std::fs::create_dir_all(&dir).map_err(|e| storage_error(e, &dir))?;
        }

        let contents = format::render(&unique, columns);
        write_atomic(&dir.join(LEDGER_FILE_NAME), &contents)?;

        debug!(count = unique.len(), "Ledger written");
        Ok(unique.len())
    }
}

impl RecordStore for CsvLedger {
    fn load(&self) -> LedgerResult<Vec<AccountRecord>> {
        self.load_unlocked()
    }

    fn upsert_sorted(&self, records: Vec<AccountRecord>) -> LedgerResult<usize> {
        let _guard = self.lock();
        self.write_sorted(records)
    }

    fn append(&self, record: AccountRecord) -> LedgerResult<AppendOutcome> {
        let account_number = validate_account_number(&record.account_number)?;
        let record = AccountRecord {
            account_number: account_number.clone(),
            ..record
        };

        let _guard = self.lock();
        let mut records = self.load_unlocked()?;

        if records.iter().any(|r| r.account_number == account_number) {
            warn!(account = %account_number, "Duplicate account number, ledger unchanged");
            return Ok(AppendOutcome {
                account_number,
                duplicate: true,
            });
        }

        records.push(record);
        self.write_sorted(records)?;
        info!(account = %account_number, "Account appended to ledger");

        Ok(AppendOutcome {
            account_number,
            duplicate: false,
        })
    }

    fn column_config(&self) -> ColumnConfig {
        self.settings.get().columns
    }

    /// Saves a new schema and rewrites an existing ledger with its header.
    ///
    /// The file is rewritten before the settings are saved; if saving
    /// fails the previous header is restored. Extra column values are
    /// positional, so dropping trailing extra columns discards their values.
    fn set_column_config(&self, columns: ColumnConfig) -> LedgerResult<ColumnConfig> {
        let columns = validate_column_config(&columns)?;

        let _guard = self.lock();
        let previous = self.settings.get().columns;
        // Rows are read with the old schema and written with the new one.
        let existing = if self.ledger_path().exists() {
            Some(self.load_unlocked()?)
        } else {
            None
        };

        let Some(records) = existing else {
            let saved = self.settings.update(|s| s.columns = columns.clone())?;
            info!(header = %saved.columns.header_line(), "Column config saved");
            return Ok(saved.columns);
        };

        let discarded = records
            .iter()
            .filter(|r| r.extra.iter().skip(columns.extra.len()).any(|v| !v.is_empty()))
            .count();
        if discarded > 0 {
            warn!(records = discarded, "Removed columns discard existing values");
        }

        self.write_sorted_as(records.clone(), &columns)?;

        match self.settings.update(|s| s.columns = columns.clone()) {
            Ok(saved) => {
                info!(header = %saved.columns.header_line(), "Ledger rewritten with new header");
                Ok(saved.columns)
            }
            Err(e) => {
                if let Err(restore) = self.write_sorted_as(records, &previous) {
                    error!(error = %restore, "Failed to restore previous ledger header");
                }
                Err(e)
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn resolve_directory(settings: &LedgerSettings, fallback: &Path) -> PathBuf {
    match &settings.ledger_directory {
        Some(dir) if dir.is_dir() => dir.clone(),
        Some(dir) => {
            warn!(dir = %dir.display(), "Configured ledger directory missing, using app data dir");
            fallback.to_path_buf()
        }
        None => fallback.to_path_buf(),
    }
}

fn dedup_first_wins(records: Vec<AccountRecord>) -> Vec<AccountRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.account_number.clone()))
        .collect()
}

fn write_atomic(path: &Path, contents: &str) -> LedgerResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| storage_error(e, dir))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| storage_error(e, path))?;
    tmp.persist(path).map_err(|e| storage_error(e.error, path))?;
    Ok(())
}

fn storage_error(err: std::io::Error, path: &Path) -> LedgerError {
    let err = LedgerError::from_io(err, path);
    error!(path = %path.display(), error = %err, "Ledger storage failure");
    err
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger() -> (TempDir, CsvLedger) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Arc::new(SettingsStore::in_memory(LedgerSettings::default()));
        let ledger = CsvLedger::new(settings, dir.path());
        (dir, ledger)
    }

    fn file_text(ledger: &CsvLedger) -> String {
        std::fs::read_to_string(ledger.ledger_path()).unwrap()
    }

    #[test]
    fn test_append_to_missing_ledger() {
        let (_dir, ledger) = ledger();
        assert!(!ledger.ledger_path().exists());

        let outcome = ledger.append(AccountRecord::new("123456")).unwrap();
        assert!(!outcome.duplicate);
        assert_eq!(
            file_text(&ledger),
            "account_number,amount,activated\n123456,0,Y\n"
        );
    }

    #[test]
    fn test_duplicate_append_leaves_file_unchanged() {
        let (_dir, ledger) = ledger();
        ledger.append(AccountRecord::new("123456")).unwrap();
        let before = file_text(&ledger);

        let outcome = ledger.append(AccountRecord::new(" 123456 ")).unwrap();
        assert!(outcome.duplicate);
        assert_eq!(outcome.account_number, "123456");
        assert_eq!(file_text(&ledger), before);
        assert!(ledger.contains("123456").unwrap());
    }

    #[test]
    fn test_append_outcome_json_shape() {
        let outcome = AppendOutcome {
            account_number: "42".to_string(),
            duplicate: true,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "accountNumber": "42", "duplicate": true })
        );
    }

    #[test]
    fn test_append_rejects_blank_account() {
        let (_dir, ledger) = ledger();
        assert!(matches!(
            ledger.append(AccountRecord::new("  ")),
            Err(LedgerError::Validation(_))
        ));
        assert!(!ledger.ledger_path().exists());
    }

    #[test]
    fn test_natural_sort_on_write() {
        let (_dir, ledger) = ledger();
        for n in ["9", "10", "2"] {
            ledger.append(AccountRecord::new(n)).unwrap();
        }
        assert_eq!(
            file_text(&ledger),
            "account_number,amount,activated\n2,0,Y\n9,0,Y\n10,0,Y\n"
        );
    }

    #[test]
    fn test_upsert_sorted_round_trip_is_byte_stable() {
        let (_dir, ledger) = ledger();
        for n in ["5022440200591308625", "28000000071372", "2130000000100080999"] {
            ledger.append(AccountRecord::new(n)).unwrap();
        }
        let before = file_text(&ledger);

        let records = ledger.load().unwrap();
        assert_eq!(ledger.upsert_sorted(records).unwrap(), 3);
        assert_eq!(file_text(&ledger), before);
    }

    #[test]
    fn test_upsert_sorted_first_occurrence_wins() {
        let (_dir, ledger) = ledger();
        let mut first = AccountRecord::new("7");
        first.amount = "10".to_string();
        let mut second = AccountRecord::new("7");
        second.amount = "99".to_string();

        assert_eq!(ledger.upsert_sorted(vec![first, second]).unwrap(), 1);
        assert_eq!(ledger.load().unwrap()[0].amount, "10");
    }

    #[test]
    fn test_header_rename_preserves_rows() {
        let (_dir, ledger) = ledger();
        ledger.append(AccountRecord::new("111")).unwrap();
        ledger.update_field("111", "amount", "25.00").unwrap();

        let columns = ColumnConfig {
            account_number: "acct".to_string(),
            amount: "amt".to_string(),
            activated: "act".to_string(),
            extra: Vec::new(),
        };
        ledger.set_column_config(columns).unwrap();

        assert_eq!(file_text(&ledger), "acct,amt,act\n111,25.00,Y\n");
        assert_eq!(ledger.column_config().header_line(), "acct,amt,act");
    }

    #[test]
    fn test_failed_settings_save_keeps_old_header() {
        let dir = tempfile::tempdir().unwrap();
        let settings_path = dir.path().join("settings.toml");
        let settings = Arc::new(SettingsStore::load(Some(settings_path.clone())).unwrap());
        let ledger = CsvLedger::new(settings, dir.path());
        ledger.append(AccountRecord::new("111")).unwrap();
        let before = file_text(&ledger);

        // A directory in place of the settings file makes the save fail.
        std::fs::create_dir(&settings_path).unwrap();
        let columns = ColumnConfig {
            amount: "balance".to_string(),
            ..Default::default()
        };
        assert!(ledger.set_column_config(columns).is_err());

        assert_eq!(file_text(&ledger), before);
        assert_eq!(ledger.column_config(), ColumnConfig::default());
    }

    #[test]
    fn test_dropping_extra_column_discards_its_values() {
        let (_dir, ledger) = ledger();
        let with_notes = ColumnConfig {
            extra: vec!["notes".to_string()],
            ..Default::default()
        };
        ledger.set_column_config(with_notes).unwrap();
        ledger.append(AccountRecord::new("7")).unwrap();
        ledger.update_field("7", "notes", "vip").unwrap();
        assert_eq!(
            file_text(&ledger),
            "account_number,amount,activated,notes\n7,0,Y,vip\n"
        );

        ledger.set_column_config(ColumnConfig::default()).unwrap();

        assert_eq!(file_text(&ledger), "account_number,amount,activated\n7,0,Y\n");
    }

    #[test]
    fn test_long_decoded_account_is_stored() {
        let (_dir, ledger) = ledger();
        let digits = "1".repeat(300);
        let decoded = swipe_core::decode(&format!(";{digits}=1?")).unwrap();

        let outcome = ledger.append(AccountRecord::new(decoded)).unwrap();

        assert_eq!(outcome.account_number, digits);
        assert!(ledger.contains(&digits).unwrap());
    }

    #[test]
    fn test_column_config_without_ledger_creates_no_file() {
        let (_dir, ledger) = ledger();
        let columns = ColumnConfig {
            amount: "balance".to_string(),
            ..Default::default()
        };
        ledger.set_column_config(columns).unwrap();
        assert!(!ledger.ledger_path().exists());

        ledger.append(AccountRecord::new("1")).unwrap();
        assert_eq!(file_text(&ledger), "account_number,balance,activated\n1,0,Y\n");
    }

    #[test]
    fn test_deduplicate() {
        let (_dir, ledger) = ledger();
        assert!(matches!(
            ledger.deduplicate(),
            Err(LedgerError::PathMissing { .. })
        ));

        std::fs::write(
            ledger.ledger_path(),
            "account_number,amount,activated\n10,0,Y\n2,5,Y\n10,7,N\n2,0,Y\n",
        )
        .unwrap();

        let report = ledger.deduplicate().unwrap();
        assert_eq!(
            report,
            DedupReport {
                duplicates_removed: 2,
                total_cards: 2,
                original_count: 4,
            }
        );
        assert_eq!(
            file_text(&ledger),
            "account_number,amount,activated\n2,5,Y\n10,0,Y\n"
        );
    }

    #[test]
    fn test_update_field_rules() {
        let (_dir, ledger) = ledger();
        ledger.append(AccountRecord::new("42")).unwrap();

        let updated = ledger.update_field("42", "activated", "N").unwrap();
        assert_eq!(updated.activated, "N");

        assert!(matches!(
            ledger.update_field("43", "amount", "1"),
            Err(LedgerError::RecordNotFound(_))
        ));
        assert!(matches!(
            ledger.update_field("42", "account_number", "1"),
            Err(LedgerError::Validation(ValidationError::ReadOnlyColumn(_)))
        ));
        assert!(matches!(
            ledger.update_field("42", "balance", "1"),
            Err(LedgerError::Validation(ValidationError::UnknownColumn(_)))
        ));
        assert!(ledger.update_field("42", "amount", "1,000").is_err());
        assert!(ledger.update_field("42", "amount", "").is_err());
    }

    #[test]
    fn test_page_and_count() {
        let (_dir, ledger) = ledger();
        for n in 1..=5 {
            ledger.append(AccountRecord::new(n.to_string())).unwrap();
        }
        assert_eq!(ledger.count().unwrap(), 5);

        let page = ledger.page(1, 2).unwrap();
        assert_eq!(page.total, 5);
        let ids: Vec<_> = page.records.iter().map(|r| r.account_number.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);

        assert!(ledger.page(9, 2).unwrap().records.is_empty());
    }

    #[test]
    fn test_set_ledger_directory() {
        let (_dir, ledger) = ledger();
        let other = tempfile::tempdir().unwrap();

        let path = ledger.set_ledger_directory(other.path()).unwrap();
        assert_eq!(path, other.path().join(LEDGER_FILE_NAME));
        assert_eq!(ledger.ledger_directory(), other.path());

        assert!(matches!(
            ledger.set_ledger_directory(other.path().join("nope")),
            Err(LedgerError::PathMissing { .. })
        ));
    }

    #[test]
    fn test_ensure_exists_writes_header_once() {
        let (_dir, ledger) = ledger();

        let path = ledger.ensure_exists().unwrap();
        assert_eq!(path, ledger.ledger_path());
        assert_eq!(file_text(&ledger), "account_number,amount,activated\n");

        ledger.append(AccountRecord::new("7")).unwrap();
        ledger.ensure_exists().unwrap();
        assert_eq!(ledger.count().unwrap(), 1);
    }

    #[test]
    fn test_missing_configured_directory_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LedgerSettings {
            ledger_directory: Some(dir.path().join("gone")),
            ..Default::default()
        };
        let ledger = CsvLedger::new(Arc::new(SettingsStore::in_memory(settings)), dir.path());
        assert_eq!(ledger.ledger_directory(), dir.path());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_directory_maps_to_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, ledger) = ledger();
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o555)).unwrap();

        let result = ledger.append(AccountRecord::new("1"));
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755)).unwrap();

        // Root ignores directory permissions.
        if let Err(err) = result {
            assert_eq!(err.kind(), swipe_core::ErrorKind::StoragePermissionDenied);
        }
    }
}
