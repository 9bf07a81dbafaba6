//! # Track Decoder
//!
//! Extracts the account number from a raw magnetic-stripe payload.
//!
//! ## Payload Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Track 1 + Track 2                                                      │
//! │  %B5022440200591308625^HEARTLAND GIFT^391200018130?;5022440200591308625=391200018130?
//! │    └──── digits ─────┘                              └──── digits ─────┘  │
//! │                                                                         │
//! │  Track 2 with separator                                                 │
//! │  ;5022440200591308625=391200018130?                                     │
//! │                                                                         │
//! │  Track 2 terminator only                                                │
//! │  ;2130000000100080999?                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Match Order (first match wins)
//! 1. `%B<digits>^`        Track 1
//! 2. `;<digits>=`         Track 2 with field separator
//! 3. `;<digits>?`         Track 2 with end sentinel only
//! 4. `%B<digits>^ ... ;<same digits>=`  both tracks agree
//!
//! Digits are ASCII `0-9` only. No length or checksum validation is
//! performed: gift card issuers use a wide range of number formats.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::DecodeFailure;

/// Which track layout produced the account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Track1,
    Track2Separator,
    Track2Terminator,
    CrossTrack,
}

impl std::fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackFormat::Track1 => write!(f, "track1"),
            TrackFormat::Track2Separator => write!(f, "track2-separator"),
            TrackFormat::Track2Terminator => write!(f, "track2-terminator"),
            TrackFormat::CrossTrack => write!(f, "cross-track"),
        }
    }
}

/// A successfully decoded swipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSwipe {
    pub account_number: String,
    pub format: TrackFormat,
}

struct TrackPatterns {
    track1: Regex,
    track2_separator: Regex,
    track2_terminator: Regex,
}

fn patterns() -> &'static TrackPatterns {
    static PATTERNS: OnceLock<TrackPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TrackPatterns {
        track1: Regex::new(r"%B([0-9]+)\^").expect("static track 1 pattern"),
        track2_separator: Regex::new(r";([0-9]+)=").expect("static track 2 pattern"),
        track2_terminator: Regex::new(r";([0-9]+)\?").expect("static track 2 pattern"),
    })
}

/// Decodes a swipe payload into an account number.
///
/// ## Example
/// ```rust
/// use swipe_core::decoder::decode;
///
/// let raw = "%B5022440200591308625^HEARTLAND GIFT^391200018130?;5022440200591308625=391200018130?";
/// assert_eq!(decode(raw).unwrap(), "5022440200591308625");
///
/// assert!(decode("hello").is_err());
/// ```
pub fn decode(raw: &str) -> Result<String, DecodeFailure> {
    decode_detailed(raw).map(|swipe| swipe.account_number)
}

/// Like [`decode`], but also reports which layout matched.
pub fn decode_detailed(raw: &str) -> Result<DecodedSwipe, DecodeFailure> {
    let p = patterns();

    let ordered = [
        (&p.track1, TrackFormat::Track1),
        (&p.track2_separator, TrackFormat::Track2Separator),
        (&p.track2_terminator, TrackFormat::Track2Terminator),
    ];

    for (pattern, format) in ordered {
        if let Some(caps) = pattern.captures(raw) {
            return Ok(DecodedSwipe {
                account_number: caps[1].to_string(),
                format,
            });
        }
    }

    if let Some(account_number) = cross_track_match(raw) {
        return Ok(DecodedSwipe {
            account_number,
            format: TrackFormat::CrossTrack,
        });
    }

    Err(DecodeFailure::new(raw))
}

/// Finds a Track 1 number that reappears as a Track 2 number later on.
///
/// The regex crate has no back-references, so the second half of
/// `%B([0-9]+)\^.*?;\1=` is checked with a substring search.
fn cross_track_match(raw: &str) -> Option<String> {
    patterns().track1.captures_iter(raw).find_map(|caps| {
        let whole = caps.get(0)?;
        let digits = &caps[1];
        let tail = &raw[whole.end()..];
        tail.contains(&format!(";{digits}="))
            .then(|| digits.to_string())
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SWIPE: &str =
        "%B5022440200591308625^HEARTLAND GIFT^391200018130?;5022440200591308625=391200018130?";

    #[test]
    fn test_track1_wins() {
        let swipe = decode_detailed(FULL_SWIPE).unwrap();
        assert_eq!(swipe.account_number, "5022440200591308625");
        assert_eq!(swipe.format, TrackFormat::Track1);
    }

    #[test]
    fn test_track1_preferred_over_different_track2_number() {
        let raw = "%B1111^NAME^99?;2222=33?";
        assert_eq!(decode(raw).unwrap(), "1111");
    }

    #[test]
    fn test_track2_with_separator() {
        let swipe = decode_detailed(";5022440200591308625=391200018130?").unwrap();
        assert_eq!(swipe.account_number, "5022440200591308625");
        assert_eq!(swipe.format, TrackFormat::Track2Separator);
    }

    #[test]
    fn test_track2_terminator_only() {
        assert_eq!(decode(";2130000000100080999?").unwrap(), "2130000000100080999");
        assert_eq!(decode(";28000000071372?").unwrap(), "28000000071372");
    }

    #[test]
    fn test_separator_preferred_over_terminator() {
        // Terminator form appears first, separator form still wins.
        assert_eq!(decode(";111?;222=9?").unwrap(), "222");
    }

    #[test]
    fn test_no_match_is_failure() {
        for raw in ["", "hello", "%B^NAME^", ";=?", "%Babc^", ";12a=", "%B12 34^"] {
            let err = decode(raw).unwrap_err();
            assert!(err.preview().ends_with("..."), "raw = {raw:?}");
        }
    }

    #[test]
    fn test_failure_keeps_truncated_payload() {
        let raw = format!("garbage{}", "x".repeat(200));
        let err = decode(&raw).unwrap_err();
        assert_eq!(err.preview().chars().count(), 53);
        assert!(err.preview().starts_with("garbage"));
    }

    #[test]
    fn test_non_ascii_digits_are_rejected() {
        // Arabic-Indic and fullwidth digits are Unicode `\d` but not card digits.
        assert!(decode("%B١٢٣^X^1?").is_err());
        assert!(decode(";１２３=4?").is_err());
        assert!(decode(";١٢٣?").is_err());
    }

    #[test]
    fn test_long_digit_run_is_accepted() {
        let digits = "1".repeat(300);
        assert_eq!(decode(&format!(";{digits}=1?")).unwrap(), digits);
    }

    #[test]
    fn test_surrounding_noise_is_ignored() {
        assert_eq!(decode("noise%B42^X^1?trailing").unwrap(), "42");
    }

    #[test]
    fn test_cross_track_helper() {
        assert_eq!(
            cross_track_match("%B123^NAME^1?;123=45?"),
            Some("123".to_string())
        );
        assert_eq!(cross_track_match("%B123^NAME^1?;124=45?"), None);
        assert_eq!(cross_track_match(";123=45?%B123^"), None);
    }

    #[test]
    fn test_track_format_display() {
        assert_eq!(TrackFormat::Track1.to_string(), "track1");
        assert_eq!(TrackFormat::CrossTrack.to_string(), "cross-track");
    }
}
