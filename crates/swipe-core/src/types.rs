//! # Domain Types
//!
//! Core domain types used throughout Swipe Ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  AccountRecord  │   │  ColumnConfig   │   │    KeyInput     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  account_number │   │  account_number │   │  key / code     │       │
//! │  │  amount         │   │  amount         │   │  char           │       │
//! │  │  activated      │   │  activated      │   │  modifiers      │       │
//! │  │  extra[]        │   │  extra[]        │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CaptureOutcome  │   │   DedupReport   │   │   RecordPage    │       │
//! │  │  Swiped         │   │  removed/total  │   │  records/total  │       │
//! │  │  SwipeError     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A record is identified by its trimmed `account_number` (exact string match).
//! The ledger never holds two records with the same account number.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ErrorKind;

/// Amount written for a freshly captured card.
pub const DEFAULT_AMOUNT: &str = "0";

/// Activation flag written for a freshly captured card.
pub const DEFAULT_ACTIVATED: &str = "Y";

// =============================================================================
// Account Record
// =============================================================================

/// One row of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Card account number (identity key).
    pub account_number: String,

    /// Operator-entered amount, stored verbatim.
    pub amount: String,

    /// Activation flag, stored verbatim.
    pub activated: String,

    /// Values of custom columns, positionally aligned with
    /// [`ColumnConfig::extra`].
    #[serde(default)]
    pub extra: Vec<String>,
}

impl AccountRecord {
    /// Creates a record with default amount (`0`) and activation (`Y`).
    pub fn new(account_number: impl Into<String>) -> Self {
        AccountRecord {
            account_number: account_number.into().trim().to_string(),
            amount: DEFAULT_AMOUNT.to_string(),
            activated: DEFAULT_ACTIVATED.to_string(),
            extra: Vec::new(),
        }
    }

    /// Returns the value stored for a field.
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::AccountNumber => &self.account_number,
            RecordField::Amount => &self.amount,
            RecordField::Activated => &self.activated,
            RecordField::Extra(idx) => self.extra.get(idx).map(String::as_str).unwrap_or(""),
        }
    }

    /// Overwrites a field. Missing custom slots are padded with empty values.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::AccountNumber => self.account_number = value,
            RecordField::Amount => self.amount = value,
            RecordField::Activated => self.activated = value,
            RecordField::Extra(idx) => {
                if self.extra.len() <= idx {
                    self.extra.resize(idx + 1, String::new());
                }
                self.extra[idx] = value;
            }
        }
    }

    /// Field values in ledger column order for the given schema.
    pub fn values<'a>(&'a self, columns: &ColumnConfig) -> Vec<&'a str> {
        let mut values = vec![
            self.account_number.as_str(),
            self.amount.as_str(),
            self.activated.as_str(),
        ];
        values.extend((0..columns.extra.len()).map(|idx| self.get(RecordField::Extra(idx))));
        values
    }
}

// =============================================================================
// Column Config
// =============================================================================

/// Logical field of an [`AccountRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    AccountNumber,
    Amount,
    Activated,
    /// Custom column by position in [`ColumnConfig::extra`].
    Extra(usize),
}

/// Mapping from logical record fields to the header text written to the
/// ledger file.
///
/// ## Example
/// ```rust
/// use swipe_core::ColumnConfig;
///
/// let columns = ColumnConfig::default();
/// assert_eq!(columns.header_line(), "account_number,amount,activated");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Header for the account number column.
    pub account_number: String,

    /// Header for the amount column.
    pub amount: String,

    /// Header for the activated column.
    pub activated: String,

    /// Headers of custom columns, written after the three fixed ones.
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            account_number: "account_number".to_string(),
            amount: "amount".to_string(),
            activated: "activated".to_string(),
            extra: Vec::new(),
        }
    }
}

impl ColumnConfig {
    /// Header names in file order.
    pub fn names(&self) -> Vec<&str> {
        let mut names = vec![
            self.account_number.as_str(),
            self.amount.as_str(),
            self.activated.as_str(),
        ];
        names.extend(self.extra.iter().map(String::as_str));
        names
    }

    /// Number of columns in a ledger row.
    pub fn len(&self) -> usize {
        3 + self.extra.len()
    }

    /// Always false; the three role columns are mandatory.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The literal first line of the ledger file.
    pub fn header_line(&self) -> String {
        self.names().join(",")
    }

    /// Resolves a column identifier to a field.
    ///
    /// Accepts either a logical role key (`accountNumber`, `amount`,
    /// `activated`) or the configured header text of any column.
    pub fn field(&self, column: &str) -> Option<RecordField> {
        if column == self.account_number {
            return Some(RecordField::AccountNumber);
        }
        if column == self.amount {
            return Some(RecordField::Amount);
        }
        if column == self.activated {
            return Some(RecordField::Activated);
        }
        if let Some(idx) = self.extra.iter().position(|name| name == column) {
            return Some(RecordField::Extra(idx));
        }

        match column {
            "accountNumber" => Some(RecordField::AccountNumber),
            "amount" => Some(RecordField::Amount),
            "activated" => Some(RecordField::Activated),
            _ => None,
        }
    }
}

// =============================================================================
// Key Input
// =============================================================================

/// A raw keyboard event as delivered by the host webview.
///
/// Mirrors the fields of a DOM `KeyboardEvent` that matter for swipe
/// capture. Card readers emulate a keyboard, so sentinel characters like `%`
/// and `^` can arrive as a shifted digit key on some layouts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyInput {
    /// Logical key value (`"a"`, `"Shift"`, `"Backspace"`, ...).
    pub key: String,

    /// Physical key code (`"Digit5"`, `"Semicolon"`, ...).
    pub code: String,

    /// Produced character, when the host knows it.
    #[serde(rename = "char")]
    pub text: Option<String>,

    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyInput {
    /// Event for a plain key press with no modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        KeyInput {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Event for a physical key code pressed with Shift.
    pub fn shifted(code: impl Into<String>) -> Self {
        KeyInput {
            key: "Unidentified".to_string(),
            code: code.into(),
            shift: true,
            ..Default::default()
        }
    }

    /// Event carrying an explicit produced character.
    pub fn with_char(text: impl Into<String>) -> Self {
        KeyInput {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// The backspace key.
    pub fn backspace() -> Self {
        KeyInput::key("Backspace")
    }
}

// =============================================================================
// Capture Outcomes
// =============================================================================

/// Event name for [`CaptureOutcome::Swiped`].
pub const SWIPED_EVENT: &str = "card-swiped";

/// Event name for [`CaptureOutcome::SwipeError`].
pub const SWIPE_ERROR_EVENT: &str = "card-swipe-error";

/// Payload of a `card-swiped` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SwipedEvent {
    pub account_number: String,
    /// True when the account number was already in the ledger.
    pub duplicate: bool,
}

/// Payload of a `card-swipe-error` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SwipeErrorEvent {
    /// Human-readable message.
    pub error: String,

    /// Stable failure category.
    pub kind: ErrorKind,

    /// Decoded account number, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Truncated raw payload, when decoding failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Result of processing one completed swipe.
///
/// Exactly one outcome is produced per swipe payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Swiped(SwipedEvent),
    SwipeError(SwipeErrorEvent),
}

impl CaptureOutcome {
    /// Name of the host event this outcome is emitted as.
    pub fn event_name(&self) -> &'static str {
        match self {
            CaptureOutcome::Swiped(_) => SWIPED_EVENT,
            CaptureOutcome::SwipeError(_) => SWIPE_ERROR_EVENT,
        }
    }

    /// Account number involved, if known.
    pub fn account_number(&self) -> Option<&str> {
        match self {
            CaptureOutcome::Swiped(e) => Some(&e.account_number),
            CaptureOutcome::SwipeError(e) => e.account_number.as_deref(),
        }
    }
}

// =============================================================================
// Ledger Reports
// =============================================================================

/// Result of an explicit deduplication pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DedupReport {
    pub duplicates_removed: u32,
    pub total_cards: u32,
    pub original_count: u32,
}

/// A page of ledger records, in ledger order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub records: Vec<AccountRecord>,
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = AccountRecord::new("  123456 ");
        assert_eq!(record.account_number, "123456");
        assert_eq!(record.amount, "0");
        assert_eq!(record.activated, "Y");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_record_values_pad_extra_columns() {
        let columns = ColumnConfig {
            extra: vec!["note".to_string(), "batch".to_string()],
            ..Default::default()
        };
        let mut record = AccountRecord::new("42");
        record.set(RecordField::Extra(1), "B7");
        assert_eq!(record.values(&columns), vec!["42", "0", "Y", "", "B7"]);
    }

    #[test]
    fn test_column_field_resolution() {
        let columns = ColumnConfig {
            account_number: "acct".to_string(),
            amount: "amt".to_string(),
            activated: "act".to_string(),
            extra: vec!["note".to_string()],
        };
        assert_eq!(columns.field("amount"), Some(RecordField::Amount));
        assert_eq!(columns.field("amt"), Some(RecordField::Amount));
        assert_eq!(columns.field("act"), Some(RecordField::Activated));
        assert_eq!(columns.field("acct"), Some(RecordField::AccountNumber));
        assert_eq!(columns.field("note"), Some(RecordField::Extra(0)));
        assert_eq!(columns.field("balance"), None);
    }

    #[test]
    fn test_column_config_deserializes_without_extra() {
        let json = r#"{"accountNumber":"acct","amount":"amt","activated":"act"}"#;
        let columns: ColumnConfig = serde_json::from_str(json).unwrap();
        assert_eq!(columns.header_line(), "acct,amt,act");
        assert_eq!(columns.len(), 3);
    }

    #[test]
    fn test_key_input_char_field_name() {
        let input: KeyInput = serde_json::from_str(r#"{"key":"%","char":"%","shift":true}"#).unwrap();
        assert_eq!(input.text.as_deref(), Some("%"));
        assert!(input.shift);
        assert_eq!(input.code, "");
    }

    #[test]
    fn test_swipe_error_event_omits_empty_fields() {
        let event = SwipeErrorEvent {
            error: "boom".to_string(),
            kind: ErrorKind::StorageFull,
            account_number: None,
            data: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"error":"boom","kind":"STORAGE_FULL"}"#);
    }
}
