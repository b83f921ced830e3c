//! Record storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Which record store backs the synchronizer
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Filesystem,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the filesystem backend
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::Filesystem && self.data_dir.is_none() {
            return Err(ValidationError::MissingRequired("storage.data_dir"));
        }
        Ok(())
    }
}
