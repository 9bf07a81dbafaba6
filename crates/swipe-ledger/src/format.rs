//! # Ledger Text Format
//!
//! Parsing and rendering of the comma-separated ledger file.
//!
//! ## Layout
//! ```text
//! account_number,amount,activated      ← header (ColumnConfig)
//! 2130000000100080999,0,Y              ← one row per record
//! 5022440200591308625,25.00,Y
//!                                      ← trailing newline
//! ```
//!
//! No quoting or escaping: values containing a comma or a line break are
//! rejected by validation before they reach this module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use swipe_core::{AccountRecord, ColumnConfig, RecordField, DEFAULT_ACTIVATED, DEFAULT_AMOUNT};
use tracing::warn;

use crate::error::{LedgerError, LedgerResult};

/// Field separator.
pub const SEPARATOR: char = ',';

// =============================================================================
// Load Mode
// =============================================================================

/// How malformed ledger lines are handled on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// Skip malformed lines and log a warning.
    #[default]
    Lenient,
    /// Fail the load on the first malformed line.
    Strict,
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadMode::Lenient => write!(f, "lenient"),
            LoadMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for LoadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(LoadMode::Lenient),
            "strict" => Ok(LoadMode::Strict),
            other => Err(format!("unknown load mode: {other}")),
        }
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Result of parsing a ledger file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLedger {
    /// Header line as found in the file, if any.
    pub header: Option<String>,
    /// Records in file order (may contain duplicates).
    pub records: Vec<AccountRecord>,
    /// Lines dropped in lenient mode.
    pub skipped: usize,
}

impl ParsedLedger {
    /// True when the file has no header or its header is the one `columns`
    /// would write. Fields are compared trimmed.
    pub fn header_matches(&self, columns: &ColumnConfig) -> bool {
        let Some(header) = &self.header else {
            return true;
        };
        header
            .split(',')
            .map(str::trim)
            .eq(columns.header_line().split(','))
    }
}

/// Parses ledger text.
///
/// The first non-blank line is the header and is never interpreted as a
/// record. Blank lines are ignored in both modes. Missing or empty
/// `amount` / `activated` values fall back to `0` / `Y`.
///
/// ## Malformed Lines
/// - empty account number
/// - (strict only) a field count different from the column count
pub fn parse(contents: &str, columns: &ColumnConfig, mode: LoadMode) -> LedgerResult<ParsedLedger> {
    let mut parsed = ParsedLedger::default();
    let mut lines = contents
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(parsed);
    };
    parsed.header = Some(header.to_string());

    for (line_no, line) in lines {
        match parse_line(line, columns, mode) {
            Ok(record) => parsed.records.push(record),
            Err(reason) if mode == LoadMode::Lenient => {
                warn!(line = line_no, reason, "Skipping malformed ledger line");
                parsed.skipped += 1;
            }
            Err(reason) => {
                return Err(LedgerError::ParseAnomaly {
                    line: line_no,
                    reason: reason.to_string(),
                })
            }
        }
    }

    Ok(parsed)
}

fn parse_line(
    line: &str,
    columns: &ColumnConfig,
    mode: LoadMode,
) -> Result<AccountRecord, &'static str> {
    let fields: Vec<&str> = line.split(SEPARATOR).map(str::trim).collect();

    if mode == LoadMode::Strict && fields.len() != columns.len() {
        return Err("field count does not match the header");
    }

    let account_number = fields.first().copied().unwrap_or_default();
    if account_number.is_empty() {
        return Err("empty account number");
    }

    let value_or = |idx: usize, default: &str| -> String {
        match fields.get(idx) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        }
    };

    let mut record = AccountRecord::new(account_number);
    record.amount = value_or(1, DEFAULT_AMOUNT);
    record.activated = value_or(2, DEFAULT_ACTIVATED);
    for idx in 0..columns.extra.len() {
        record.set(RecordField::Extra(idx), value_or(3 + idx, ""));
    }

    Ok(record)
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the header followed by one line per record, each terminated
/// by `\n`.
///
/// ## Example
/// ```rust
/// use swipe_core::{AccountRecord, ColumnConfig};
/// use swipe_ledger::format::render;
///
/// let text = render(&[AccountRecord::new("123456")], &ColumnConfig::default());
/// assert_eq!(text, "account_number,amount,activated\n123456,0,Y\n");
/// ```
pub fn render(records: &[AccountRecord], columns: &ColumnConfig) -> String {
    let mut out = columns.header_line();
    out.push('\n');
    for record in records {
        out.push_str(&record.values(columns).join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(text: &str) -> ParsedLedger {
        parse(text, &ColumnConfig::default(), LoadMode::Lenient).unwrap()
    }

    #[test]
    fn test_empty_and_header_only() {
        assert_eq!(lenient(""), ParsedLedger::default());

        let parsed = lenient("account_number,amount,activated\n");
        assert_eq!(parsed.header.as_deref(), Some("account_number,amount,activated"));
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_header_matches_configured_columns() {
        let columns = ColumnConfig::default();

        assert!(lenient("").header_matches(&columns));
        assert!(lenient("account_number, amount ,activated\n1\n").header_matches(&columns));
        assert!(!lenient("acct,amt,act\n1\n").header_matches(&columns));
        assert!(!lenient("account_number,amount\n1\n").header_matches(&columns));

        let with_note = ColumnConfig {
            extra: vec!["note".to_string()],
            ..Default::default()
        };
        assert!(lenient("account_number,amount,activated,note\n").header_matches(&with_note));
        assert!(!lenient("account_number,amount,activated\n").header_matches(&with_note));
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let parsed = lenient("h\n111\n222,5\n333,,N\n");
        let values: Vec<_> = parsed
            .records
            .iter()
            .map(|r| (r.account_number.as_str(), r.amount.as_str(), r.activated.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![("111", "0", "Y"), ("222", "5", "Y"), ("333", "0", "N")]
        );
    }

    #[test]
    fn test_lenient_skips_empty_account() {
        let parsed = lenient("h\n,5,Y\n\n  \n444,1,Y\r\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].account_number, "444");
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_strict_rejects_malformed_lines() {
        let columns = ColumnConfig::default();

        let err = parse("h\n111,0,Y\n,5,Y\n", &columns, LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LedgerError::ParseAnomaly { line: 3, .. }));

        let err = parse("h\n111,0\n", &columns, LoadMode::Strict).unwrap_err();
        assert!(matches!(err, LedgerError::ParseAnomaly { line: 2, .. }));

        assert!(parse("h\n111,0,Y\n", &columns, LoadMode::Strict).is_ok());
    }

    #[test]
    fn test_extra_columns() {
        let columns = ColumnConfig {
            extra: vec!["note".to_string()],
            ..Default::default()
        };
        let parsed = parse("h\n1,0,Y,gift\n2,0,Y\n", &columns, LoadMode::Lenient).unwrap();
        assert_eq!(parsed.records[0].extra, vec!["gift"]);
        assert_eq!(parsed.records[1].extra, vec![""]);

        let text = render(&parsed.records, &columns);
        assert_eq!(
            text,
            "account_number,amount,activated,note\n1,0,Y,gift\n2,0,Y,\n"
        );
    }

    #[test]
    fn test_render_header_only() {
        assert_eq!(
            render(&[], &ColumnConfig::default()),
            "account_number,amount,activated\n"
        );
    }

    #[test]
    fn test_load_mode_parsing() {
        assert_eq!("strict".parse::<LoadMode>().unwrap(), LoadMode::Strict);
        assert_eq!(" Lenient ".parse::<LoadMode>().unwrap(), LoadMode::Lenient);
        assert!("loose".parse::<LoadMode>().is_err());
        assert_eq!(LoadMode::default(), LoadMode::Lenient);
    }
}
