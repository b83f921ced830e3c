//! Storage Adapters
//!
//! Implementations of the DecisionRecordStore port.
//!
//! ## Available Adapters
//!
//! - **FsDecisionRecordStore** - One JSON file per record on disk
//! - **InMemoryDecisionRecordStore** - Records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use pivot_compass::adapters::storage::build_record_store;
//!
//! let store = build_record_store(&config.storage)?;
//! ```

mod filesystem;
mod in_memory;

pub use filesystem::FsDecisionRecordStore;
pub use in_memory::InMemoryDecisionRecordStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig, ValidationError};
use crate::ports::DecisionRecordStore;

/// Builds the record store selected by configuration.
///
/// # Errors
///
/// Returns `ValidationError` if the filesystem backend has no data directory.
pub fn build_record_store(
    config: &StorageConfig,
) -> Result<Arc<dyn DecisionRecordStore>, ValidationError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory decision record store");
            Ok(Arc::new(InMemoryDecisionRecordStore::new()))
        }
        StorageBackend::Filesystem => {
            let dir = config
                .data_dir
                .as_ref()
                .ok_or(ValidationError::MissingRequired("storage.data_dir"))?;
            tracing::info!(data_dir = %dir.display(), "Using filesystem decision record store");
            Ok(Arc::new(FsDecisionRecordStore::new(dir)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn memory_backend_builds_without_directory() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            data_dir: None,
        };
        assert!(build_record_store(&config).is_ok());
    }

    #[test]
    fn filesystem_backend_requires_directory() {
        let config = StorageConfig {
            backend: StorageBackend::Filesystem,
            data_dir: None,
        };
        assert!(matches!(
            build_record_store(&config),
            Err(ValidationError::MissingRequired("storage.data_dir"))
        ));

        let config = StorageConfig {
            backend: StorageBackend::Filesystem,
            data_dir: Some(PathBuf::from("/tmp/pivot-compass")),
        };
        assert!(build_record_store(&config).is_ok());
    }
}
