//! # Validation Module
//!
//! Input validation utilities for Swipe Ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Tauri Command (Rust)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: ledger format rules                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger file                                                  │
//! │  └── No quoting: a comma or newline in a value would corrupt the row   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use swipe_core::validation::validate_account_number;
//!
//! assert_eq!(validate_account_number("  123456 ").unwrap(), "123456");
//! assert!(validate_account_number("   ").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::ColumnConfig;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest header name accepted for a column.
pub const MAX_COLUMN_NAME_LEN: usize = 64;

/// Longest value accepted for a single ledger field.
pub const MAX_FIELD_LEN: usize = 256;

// =============================================================================
// Ledger Values
// =============================================================================

/// Validates a manually entered or decoded account number.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must not contain the field separator or a line break
///
/// Length is not limited: any digit run a reader produces is accepted.
///
/// ## Returns
/// The trimmed account number.
pub fn validate_account_number(raw: &str) -> ValidationResult<String> {
    let account_number = raw.trim();

    if account_number.is_empty() {
        return Err(ValidationError::Required {
            field: "account number".to_string(),
        });
    }

    check_separator_free("account number", account_number)?;

    Ok(account_number.to_string())
}

/// Validates a value written to an editable column.
///
/// Empty values are allowed; separators are not.
pub fn validate_field_value(column: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    check_separator_free(column, value)?;

    if value.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: column.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Column Config
// =============================================================================

/// Validates a column configuration payload.
///
/// ## Rules
/// - `accountNumber`, `amount` and `activated` are required and non-empty
/// - Custom column names are non-empty
/// - No name contains a comma or line break
/// - Names are unique
///
/// ## Returns
/// A copy with every name trimmed.
pub fn validate_column_config(columns: &ColumnConfig) -> ValidationResult<ColumnConfig> {
    let required = |role: &str, name: &str| -> ValidationResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: format!("Column name for \"{role}\""),
            });
        }
        check_column_name(role, name)?;
        Ok(name.to_string())
    };

    let cleaned = ColumnConfig {
        account_number: required("accountNumber", &columns.account_number)?,
        amount: required("amount", &columns.amount)?,
        activated: required("activated", &columns.activated)?,
        extra: columns
            .extra
            .iter()
            .map(|name| required("extra", name))
            .collect::<ValidationResult<Vec<_>>>()?,
    };

    let mut seen = HashSet::new();
    for name in cleaned.names() {
        if !seen.insert(name) {
            return Err(ValidationError::Duplicate {
                field: "column".to_string(),
                value: name.to_string(),
            });
        }
    }

    Ok(cleaned)
}

fn check_column_name(role: &str, name: &str) -> ValidationResult<()> {
    check_separator_free(role, name)?;
    if name.len() > MAX_COLUMN_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: format!("Column name for \"{role}\""),
            max: MAX_COLUMN_NAME_LEN,
        });
    }
    Ok(())
}

fn check_separator_free(field: &str, value: &str) -> ValidationResult<()> {
    if value.contains(&[',', '\n', '\r'][..]) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain commas or line breaks".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
