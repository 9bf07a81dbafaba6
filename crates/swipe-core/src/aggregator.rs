//! # Swipe Aggregator
//!
//! Assembles keystrokes from a keyboard-emulating card reader into one
//! swipe payload.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            char (arm deadline)                                          │
//! │   ┌──────┐ ─────────────────────► ┌──────────────┐ ◄──┐ char           │
//! │   │ Idle │                        │ Accumulating │ ───┘ (re-arm)       │
//! │   └──────┘ ◄───────────────────── └──────────────┘ ◄──┐ backspace      │
//! │      ▲      deadline passed:             │         ───┘ (pop, keep     │
//! │      │      emit buffer                  │              deadline)      │
//! │      └───────────────────────────────────┘                              │
//! │             stop: cancel + clear (no emit)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers emit a swipe as a fast burst of key events with no terminator the
//! application can rely on, so silence for [`DEFAULT_SWIPE_TIMEOUT`] is
//! treated as end-of-swipe.
//!
//! The aggregator never reads a clock or sleeps. Callers pass `now` into
//! every transition and call [`SwipeAggregator::poll`] once the deadline
//! returned by [`SwipeAggregator::deadline`] has passed.

use std::time::{Duration, Instant};

use crate::types::KeyInput;

/// Quiet period that ends a swipe.
pub const DEFAULT_SWIPE_TIMEOUT: Duration = Duration::from_millis(500);

// =============================================================================
// Key Classification
// =============================================================================

/// What a raw key event means to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Append this character.
    Char(char),
    /// Remove the last buffered character.
    Backspace,
    /// Modifier-only or control key; no effect.
    Ignore,
}

/// Classifies a raw key event.
///
/// ## Rules (in order)
/// 1. A single-character `char` from the host is used as-is
/// 2. Track sentinels arriving as raw keys are remapped:
///    `%` (Shift+Digit5), `;` (Semicolon), `=` (Equal), `?` (Shift+Slash),
///    `^` (Shift+Digit6)
/// 3. `Backspace`
/// 4. Any single printable `key` without Ctrl/Meta/Alt
/// 5. Everything else is ignored
pub fn classify(input: &KeyInput) -> KeyAction {
    if let Some(c) = input.text.as_deref().and_then(single_char) {
        return KeyAction::Char(c);
    }

    let key = input.key.as_str();
    let code = input.code.as_str();

    if key == "%" || (code == "Digit5" && input.shift) {
        KeyAction::Char('%')
    } else if key == ";" || code == "Semicolon" {
        KeyAction::Char(';')
    } else if key == "=" || code == "Equal" {
        KeyAction::Char('=')
    } else if key == "?" || (code == "Slash" && input.shift) {
        KeyAction::Char('?')
    } else if key == "^" || (code == "Digit6" && input.shift) {
        KeyAction::Char('^')
    } else if key == "Backspace" {
        KeyAction::Backspace
    } else if let Some(c) = single_char(key) {
        if input.ctrl || input.meta || input.alt || c.is_control() {
            KeyAction::Ignore
        } else {
            KeyAction::Char(c)
        }
    } else {
        KeyAction::Ignore
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// Aggregator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Nothing buffered.
    Idle,
    /// Characters buffered; a deadline is armed.
    Accumulating,
}

/// Time-windowed swipe buffer.
///
/// ## Example
/// ```rust
/// use std::time::{Duration, Instant};
/// use swipe_core::aggregator::SwipeAggregator;
/// use swipe_core::KeyInput;
///
/// let mut agg = SwipeAggregator::default();
/// let t0 = Instant::now();
///
/// agg.feed(&KeyInput::key("4"), t0);
/// agg.feed(&KeyInput::key("2"), t0 + Duration::from_millis(10));
///
/// assert_eq!(agg.poll(t0 + Duration::from_millis(100)), None);
/// assert_eq!(agg.poll(t0 + Duration::from_millis(510)), Some("42".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct SwipeAggregator {
    timeout: Duration,
    buffer: String,
    deadline: Option<Instant>,
}

impl Default for SwipeAggregator {
    fn default() -> Self {
        SwipeAggregator::new(DEFAULT_SWIPE_TIMEOUT)
    }
}

impl SwipeAggregator {
    /// Creates an aggregator with a custom quiet period.
    pub fn new(timeout: Duration) -> Self {
        SwipeAggregator {
            timeout,
            buffer: String::new(),
            deadline: None,
        }
    }

    /// Quiet period that ends a swipe.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Current state.
    pub fn state(&self) -> AggregatorState {
        if self.buffer.is_empty() {
            AggregatorState::Idle
        } else {
            AggregatorState::Accumulating
        }
    }

    /// Characters buffered so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Number of buffered characters.
    pub fn buffered_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// When the pending swipe should be flushed, if a deadline is armed.
    ///
    /// A deadline can outlive the buffer: backspacing everything away does
    /// not cancel it, and firing it then yields nothing.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Applies a raw key event. Returns how it was interpreted.
    pub fn feed(&mut self, input: &KeyInput, now: Instant) -> KeyAction {
        let action = classify(input);
        match action {
            KeyAction::Char(c) => self.push_char(c, now),
            KeyAction::Backspace => self.backspace(),
            KeyAction::Ignore => {}
        }
        action
    }

    /// Appends a character and (re-)arms the deadline.
    pub fn push_char(&mut self, c: char, now: Instant) {
        self.buffer.push(c);
        self.deadline = Some(now + self.timeout);
    }

    /// Removes the last character. The deadline is left as it is.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Flushes the buffer if the deadline has passed.
    ///
    /// Returns the completed payload, or `None` if the deadline has not
    /// passed yet or the buffer was empty when it did.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.buffer.is_empty() {
                    None
                } else {
                    Some(std::mem::take(&mut self.buffer))
                }
            }
            _ => None,
        }
    }

    /// Cancels the deadline and discards the buffer.
    ///
    /// Returns the number of characters discarded.
    pub fn reset(&mut self) -> usize {
        let discarded = self.buffered_chars();
        self.buffer.clear();
        self.deadline = None;
        discarded
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_classify_printable_and_char() {
        assert_eq!(classify(&KeyInput::key("a")), KeyAction::Char('a'));
        assert_eq!(classify(&KeyInput::key("7")), KeyAction::Char('7'));
        assert_eq!(classify(&KeyInput::with_char("B")), KeyAction::Char('B'));
    }

    #[test]
    fn test_classify_symbol_remaps() {
        assert_eq!(classify(&KeyInput::shifted("Digit5")), KeyAction::Char('%'));
        assert_eq!(classify(&KeyInput::shifted("Digit6")), KeyAction::Char('^'));
        assert_eq!(classify(&KeyInput::shifted("Slash")), KeyAction::Char('?'));

        let semicolon = KeyInput {
            key: "Unidentified".to_string(),
            code: "Semicolon".to_string(),
            ..Default::default()
        };
        assert_eq!(classify(&semicolon), KeyAction::Char(';'));

        let equal = KeyInput {
            key: "Unidentified".to_string(),
            code: "Equal".to_string(),
            ..Default::default()
        };
        assert_eq!(classify(&equal), KeyAction::Char('='));
    }

    #[test]
    fn test_classify_unshifted_digit_is_not_remapped() {
        let input = KeyInput {
            key: "5".to_string(),
            code: "Digit5".to_string(),
            ..Default::default()
        };
        assert_eq!(classify(&input), KeyAction::Char('5'));
    }

    #[test]
    fn test_classify_ignores_modifiers_and_controls() {
        assert_eq!(classify(&KeyInput::key("Shift")), KeyAction::Ignore);
        assert_eq!(classify(&KeyInput::key("Enter")), KeyAction::Ignore);
        assert_eq!(classify(&KeyInput::key("ArrowLeft")), KeyAction::Ignore);

        let ctrl_c = KeyInput {
            key: "c".to_string(),
            ctrl: true,
            ..Default::default()
        };
        assert_eq!(classify(&ctrl_c), KeyAction::Ignore);
        assert_eq!(classify(&KeyInput::backspace()), KeyAction::Backspace);
    }

    #[test]
    fn test_burst_flushes_once_after_timeout() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("a"), t0);
        agg.feed(&KeyInput::key("b"), t0 + ms(5));
        agg.feed(&KeyInput::key("c"), t0 + ms(10));
        assert_eq!(agg.state(), AggregatorState::Accumulating);
        assert_eq!(agg.deadline(), Some(t0 + ms(510)));

        assert_eq!(agg.poll(t0 + ms(509)), None);
        assert_eq!(agg.poll(t0 + ms(510)), Some("abc".to_string()));
        assert_eq!(agg.state(), AggregatorState::Idle);
        assert_eq!(agg.deadline(), None);
        assert_eq!(agg.poll(t0 + ms(2000)), None);
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("a"), t0);
        agg.feed(&KeyInput::backspace(), t0 + ms(5));
        agg.feed(&KeyInput::key("b"), t0 + ms(10));

        assert_eq!(agg.poll(t0 + ms(510)), Some("b".to_string()));
    }

    #[test]
    fn test_backspace_does_not_rearm() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("1"), t0);
        agg.feed(&KeyInput::key("2"), t0 + ms(10));
        agg.feed(&KeyInput::backspace(), t0 + ms(400));

        assert_eq!(agg.deadline(), Some(t0 + ms(510)));
        assert_eq!(agg.poll(t0 + ms(510)), Some("1".to_string()));
    }

    #[test]
    fn test_backspace_to_empty_keeps_deadline_and_emits_nothing() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("x"), t0);
        agg.feed(&KeyInput::backspace(), t0 + ms(5));

        assert_eq!(agg.state(), AggregatorState::Idle);
        assert_eq!(agg.deadline(), Some(t0 + ms(500)));
        assert_eq!(agg.poll(t0 + ms(500)), None);
        assert_eq!(agg.deadline(), None);
    }

    #[test]
    fn test_ignored_keys_do_not_rearm() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("9"), t0);
        agg.feed(&KeyInput::key("Shift"), t0 + ms(300));

        assert_eq!(agg.deadline(), Some(t0 + ms(500)));
        assert_eq!(agg.buffer(), "9");
    }

    #[test]
    fn test_reset_discards_without_emitting() {
        let mut agg = SwipeAggregator::new(ms(100));
        let t0 = Instant::now();

        agg.feed(&KeyInput::key("a"), t0);
        agg.feed(&KeyInput::key("b"), t0);
        assert_eq!(agg.reset(), 2);
        assert_eq!(agg.deadline(), None);
        assert_eq!(agg.poll(t0 + ms(1000)), None);
    }

    #[test]
    fn test_full_swipe_via_shifted_keys() {
        let mut agg = SwipeAggregator::default();
        let t0 = Instant::now();

        let events = [
            KeyInput::shifted("Digit5"),
            KeyInput::key("B"),
            KeyInput::key("1"),
            KeyInput::key("2"),
            KeyInput::shifted("Digit6"),
            KeyInput::key("Shift"),
            KeyInput::shifted("Slash"),
        ];
        for (i, event) in events.iter().enumerate() {
            agg.feed(event, t0 + ms(i as u64));
        }

        assert_eq!(agg.poll(t0 + ms(600)), Some("%B12^?".to_string()));
    }
}
