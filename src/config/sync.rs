//! Persistence synchronizer configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest accepted debounce window.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Save loop settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Quiet period after the last change before a save is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SyncConfig {
    /// Debounce window as a `Duration`
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate sync configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.debounce_ms == 0 || self.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ValidationError::InvalidDebounce {
                actual: self.debounce_ms,
                max: MAX_DEBOUNCE_MS,
            });
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    1_000
}
