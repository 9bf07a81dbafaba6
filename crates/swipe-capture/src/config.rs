//! # Capture Configuration
//!
//! Tuning for the capture controller.
//!
//! | Setting          | Default | Env override        |
//! |------------------|---------|---------------------|
//! | `swipe_timeout`  | 500 ms  | `SWIPE_TIMEOUT_MS`  |
//! | `command_buffer` | 256     |                     |
//!
//! Readers differ in how fast they type. Slow USB readers on busy machines
//! occasionally pause longer than 500 ms mid-swipe, which splits one swipe
//! into two decode failures; raising the timeout is the fix.

use std::time::Duration;

use swipe_core::DEFAULT_SWIPE_TIMEOUT;
use tracing::{debug, warn};

use crate::error::{CaptureError, CaptureResult};

/// Environment variable overriding the swipe timeout, in milliseconds.
pub const ENV_SWIPE_TIMEOUT_MS: &str = "SWIPE_TIMEOUT_MS";

/// Default capacity of the controller's command channel.
pub const DEFAULT_COMMAND_BUFFER: usize = 256;

/// Configuration for the capture controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Quiet period that ends a swipe.
    pub swipe_timeout: Duration,
    /// Capacity of the command channel. Key events beyond this back-pressure
    /// the caller.
    pub command_buffer: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            swipe_timeout: DEFAULT_SWIPE_TIMEOUT,
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl CaptureConfig {
    /// Creates a config with a custom swipe timeout.
    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        CaptureConfig {
            swipe_timeout: Duration::from_millis(timeout_ms),
            ..Default::default()
        }
    }

    /// Defaults plus environment overrides, validated.
    pub fn from_env() -> CaptureResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CaptureResult<()> {
        if self.swipe_timeout.is_zero() {
            return Err(CaptureError::InvalidConfig(
                "swipe_timeout must be greater than 0".into(),
            ));
        }
        if self.command_buffer == 0 {
            return Err(CaptureError::InvalidConfig(
                "command_buffer must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(ENV_SWIPE_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => {
                    debug!(timeout_ms = ms, "Overriding swipe timeout from environment");
                    self.swipe_timeout = Duration::from_millis(ms);
                }
                Err(_) => warn!(value = %raw, "Invalid swipe timeout in environment"),
            }
        }
    }
}
