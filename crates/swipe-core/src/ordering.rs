//! # Natural Ordering
//!
//! Numeric-aware, case-insensitive string comparison used to sort the ledger.
//!
//! ```text
//!   lexical:  "10" < "2" < "9"
//!   natural:  "2"  < "9" < "10"
//! ```
//!
//! Strings are split into runs of ASCII digits and runs of everything else.
//! Digit runs compare by numeric value (without parsing, so 30-digit account
//! numbers never overflow); other runs compare case-insensitively.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;

/// Compares two strings with numeric-aware ordering.
///
/// ## Example
/// ```rust
/// use swipe_core::ordering::natural_cmp;
/// use std::cmp::Ordering;
///
/// assert_eq!(natural_cmp("9", "10"), Ordering::Less);
/// assert_eq!(natural_cmp("card2", "card10"), Ordering::Less);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_chunks(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Sorts account numbers in place (stable).
pub fn sort_natural_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| natural_cmp(key(a), key(b)));
}

#[derive(Debug, Clone, Copy)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn compare_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(x), Chunk::Digits(y)) => compare_digit_runs(x, y),
        // Digits sort before letters, as they do in most collations.
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        (Chunk::Text(x), Chunk::Text(y)) => x
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(y.chars().flat_map(char::to_lowercase)),
    }
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

struct Chunks<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Chunks<'a> {
    fn new(source: &'a str) -> Self {
        Chunks {
            source,
            chars: source.char_indices().peekable(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, first) = self.chars.next()?;
        let digits = first.is_ascii_digit();
        let mut end = start + first.len_utf8();

        while let Some(&(idx, c)) = self.chars.peek() {
            if c.is_ascii_digit() != digits {
                break;
            }
            end = idx + c.len_utf8();
            self.chars.next();
        }

        let run = &self.source[start..end];
        Some(if digits {
            Chunk::Digits(run)
        } else {
            Chunk::Text(run)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_order() {
        let mut numbers = vec!["9", "10", "2"];
        sort_natural_by(&mut numbers, |s| *s);
        assert_eq!(numbers, vec!["2", "9", "10"]);
    }

    #[test]
    fn test_long_account_numbers() {
        assert_eq!(
            natural_cmp("5022440200591308625", "28000000071372"),
            Ordering::Greater
        );
        assert_eq!(
            natural_cmp("99999999999999999999999999", "100000000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_mixed_text_and_digits() {
        assert_eq!(natural_cmp("card2", "card10"), Ordering::Less);
        assert_eq!(natural_cmp("Card2", "card2"), Ordering::Equal);
        assert_eq!(natural_cmp("1a", "a1"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros_compare_equal_numerically() {
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("007", "8"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("", "1"), Ordering::Less);
        assert_eq!(natural_cmp("12", "12a"), Ordering::Less);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut items = vec![("07", 'a'), ("7", 'b'), ("1", 'c')];
        sort_natural_by(&mut items, |(k, _)| *k);
        assert_eq!(items, vec![("1", 'c'), ("07", 'a'), ("7", 'b')]);
    }
}
