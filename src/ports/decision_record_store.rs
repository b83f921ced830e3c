//! Decision Record Store Port - Interface for persisting decision records.
//!
//! The synchronizer is the only caller. It fetches the open record when a
//! session starts and upserts the whole record after each debounced change.

use async_trait::async_trait;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{DecisionId, ProjectId};

/// Errors that can occur during record store operations
#[derive(Debug, thiserror::Error)]
pub enum RecordStoreError {
    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize record: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Record {id} belongs to project {actual}, not {expected}")]
    ProjectMismatch {
        id: DecisionId,
        expected: ProjectId,
        actual: ProjectId,
    },

    #[error("Record {record_id} cannot be stored under id {id}")]
    IdMismatch { id: DecisionId, record_id: DecisionId },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading and saving decision records
#[async_trait]
pub trait DecisionRecordStore: Send + Sync {
    /// Fetch the most recently created, not yet completed record of a project
    ///
    /// # Returns
    /// `None` if the project has no open decision
    ///
    /// # Errors
    /// Returns `RecordStoreError` if the backend cannot be read
    async fn fetch_latest_open_decision(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<DecisionRecord>, RecordStoreError>;

    /// Insert or replace a record by id
    ///
    /// # Errors
    /// Returns `RecordStoreError::IdMismatch` if `id` is not `record.id`,
    /// or another `RecordStoreError` if the write fails
    async fn upsert_decision(
        &self,
        id: DecisionId,
        record: &DecisionRecord,
    ) -> Result<(), RecordStoreError>;
}
