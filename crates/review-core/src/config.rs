//! Client configuration
//!
//! Every tunable limit and delay of the submission form lives here. The
//! defaults match what the analysis backend enforces; pages may override
//! them with a TOML or JSON document.

use crate::error::{Result, ReviewError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Size ceiling shared with the backend (16 MiB)
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// Minimum trimmed length of pasted code
pub const MIN_CODE_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Minimum trimmed character count for pasted code (default: 10)
    pub min_code_chars: usize,
    /// Maximum upload size in bytes (default: 16 MiB)
    pub max_file_bytes: u64,
    /// How long the busy indicator may stay up without a response (default: 30s)
    pub submit_timeout_ms: u64,
    /// Delay before reading pasted content (default: 100ms)
    pub paste_delay_ms: u64,
    /// Lifetime of a notification (default: 5s)
    pub alert_ttl_ms: u64,
    /// How long the print stylesheet stays attached after printing (default: 1s)
    pub print_grace_ms: u64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            min_code_chars: MIN_CODE_CHARS,
            max_file_bytes: MAX_FILE_BYTES,
            submit_timeout_ms: 30_000,
            paste_delay_ms: 100,
            alert_ttl_ms: 5_000,
            print_grace_ms: 1_000,
        }
    }
}

impl ReviewConfig {
    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    ///
    /// ```
    /// use review_core::ReviewConfig;
    ///
    /// let config = ReviewConfig::from_toml_str("submit_timeout_ms = 10000").unwrap();
    /// assert_eq!(config.submit_timeout().as_secs(), 10);
    /// assert_eq!(config.min_code_chars, 10);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ReviewError::Config(e.to_string()))?;
        config.checked()
    }

    /// Parse configuration from JSON, as embedded in a page's data attribute
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| ReviewError::Config(e.to_string()))?;
        config.checked()
    }

    fn checked(self) -> Result<Self> {
        if self.max_file_bytes == 0 {
            return Err(ReviewError::Config(
                "max_file_bytes must be greater than zero".to_string(),
            ));
        }
        if self.submit_timeout_ms == 0 {
            return Err(ReviewError::Config(
                "submit_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }

    pub fn alert_ttl(&self) -> Duration {
        Duration::from_millis(self.alert_ttl_ms)
    }

    pub fn print_grace(&self) -> Duration {
        Duration::from_millis(self.print_grace_ms)
    }
}
