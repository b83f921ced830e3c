//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PIVOT_COMPASS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pivot_compass::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging);
//! ```

mod error;
mod logging;
mod storage;
mod sync;

pub use error::{ConfigError, ValidationError};
pub use logging::{init_tracing, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use sync::{SyncConfig, MAX_DEBOUNCE_MS};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// in-memory setup.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Save loop settings (debounce window)
    #[serde(default)]
    pub sync: SyncConfig,

    /// Record store selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PIVOT_COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PIVOT_COMPASS__SYNC__DEBOUNCE_MS=500` -> `sync.debounce_ms = 500`
    /// - `PIVOT_COMPASS__STORAGE__BACKEND=filesystem` -> `storage.backend = filesystem`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIVOT_COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.sync.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("PIVOT_COMPASS__SYNC__DEBOUNCE_MS");
        env::remove_var("PIVOT_COMPASS__STORAGE__BACKEND");
        env::remove_var("PIVOT_COMPASS__STORAGE__DATA_DIR");
        env::remove_var("PIVOT_COMPASS__LOGGING__LEVEL");
        env::remove_var("PIVOT_COMPASS__LOGGING__JSON");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.sync.debounce_ms, 1_000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PIVOT_COMPASS__SYNC__DEBOUNCE_MS", "250");
        env::set_var("PIVOT_COMPASS__STORAGE__BACKEND", "filesystem");
        env::set_var("PIVOT_COMPASS__STORAGE__DATA_DIR", "/var/lib/pivot-compass");
        env::set_var("PIVOT_COMPASS__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.sync.debounce_ms, 250);
        assert_eq!(config.storage.backend, StorageBackend::Filesystem);
        assert_eq!(
            config.storage.data_dir,
            Some(PathBuf::from("/var/lib/pivot-compass"))
        );
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filesystem_without_dir_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PIVOT_COMPASS__STORAGE__BACKEND", "filesystem");
        let result = AppConfig::load_validated();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(ValidationError::MissingRequired(
                "storage.data_dir"
            )))
        ));
    }

    #[test]
    fn test_zero_debounce_fails_validation() {
        let config = AppConfig {
            sync: SyncConfig { debounce_ms: 0 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
