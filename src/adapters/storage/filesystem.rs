//! Filesystem Decision Record Store Adapter
//!
//! Stores each record as pretty-printed JSON, organized by project:
//!
//! ```text
//! {base}/decisions/{project_id}/{decision_id}.json
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a reader
//! never sees a half-written record. A file that cannot be parsed is
//! skipped with a warning when looking for the open record.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{DecisionId, ProjectId};
use crate::ports::{DecisionRecordStore, RecordStoreError};

/// File-based storage for decision records
#[derive(Debug, Clone)]
pub struct FsDecisionRecordStore {
    base_path: PathBuf,
}

impl FsDecisionRecordStore {
    /// Create a store rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding every record of a project
    fn project_dir(&self, project_id: ProjectId) -> PathBuf {
        self.base_path.join("decisions").join(project_id.to_string())
    }

    /// Path of a single record file
    pub fn record_path(&self, project_id: ProjectId, id: DecisionId) -> PathBuf {
        self.project_dir(project_id).join(format!("{}.json", id))
    }

    async fn read_record(&self, path: &Path) -> Result<DecisionRecord, RecordStoreError> {
        let json = fs::read_to_string(path)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?;

        serde_json::from_str(&json).map_err(|e| {
            RecordStoreError::DeserializationFailed(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl DecisionRecordStore for FsDecisionRecordStore {
    async fn fetch_latest_open_decision(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<DecisionRecord>, RecordStoreError> {
        let dir = self.project_dir(project_id);
        if !dir.exists() {
            return Ok(None);
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?;

        let mut latest: Option<DecisionRecord> = None;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let record = match self.read_record(&path).await {
                Ok(record) => record,
                Err(RecordStoreError::DeserializationFailed(reason)) => {
                    tracing::warn!(project_id = %project_id, reason = %reason, "Skipping unreadable decision record");
                    continue;
                }
                Err(err) => return Err(err),
            };
            if record.project_id != project_id {
                return Err(RecordStoreError::ProjectMismatch {
                    id: record.id,
                    expected: project_id,
                    actual: record.project_id,
                });
            }
            if record.is_completed() {
                continue;
            }
            if latest
                .as_ref()
                .map_or(true, |current| record.created_at > current.created_at)
            {
                latest = Some(record);
            }
        }

        tracing::debug!(
            project_id = %project_id,
            found = latest.is_some(),
            "Scanned project directory for open decision"
        );
        Ok(latest)
    }

    async fn upsert_decision(
        &self,
        id: DecisionId,
        record: &DecisionRecord,
    ) -> Result<(), RecordStoreError> {
        if id != record.id {
            return Err(RecordStoreError::IdMismatch {
                id,
                record_id: record.id,
            });
        }

        let dir = self.project_dir(record.project_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| RecordStoreError::IoError(e.to_string()))?;

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| RecordStoreError::SerializationFailed(e.to_string()))?;

        let file_path = self.record_path(record.project_id, id);
        let temp_path = file_path.with_extension("json.tmp");

        fs::write(&temp_path, json)
            .await
            .map_err(|e| RecordStoreError::IoError(format!("Failed to write file: {}", e)))?;
        fs::rename(&temp_path, &file_path)
            .await
            .map_err(|e| RecordStoreError::IoError(format!("Failed to rename file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::DecisionMode;
    use crate::domain::foundation::Timestamp;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_project_directory_means_no_decision() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        assert_eq!(
            store.fetch_latest_open_decision(ProjectId::new()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn upsert_writes_record_under_project_directory() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let record = DecisionRecord::new(ProjectId::new(), DecisionMode::Detailed);

        store.upsert_decision(record.id, &record).await.unwrap();

        let path = store.record_path(record.project_id, record.id);
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = store
            .fetch_latest_open_decision(record.project_id)
            .await
            .unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn completed_records_are_skipped() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let project = ProjectId::new();

        let mut done = DecisionRecord::new(project, DecisionMode::Easy);
        done.completed_at = Some(Timestamp::now());
        store.upsert_decision(done.id, &done).await.unwrap();

        let open = DecisionRecord::new(project, DecisionMode::Easy);
        store.upsert_decision(open.id, &open).await.unwrap();

        let loaded = store.fetch_latest_open_decision(project).await.unwrap();
        assert_eq!(loaded.map(|r| r.id), Some(open.id));
    }

    #[tokio::test]
    async fn corrupt_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let project = ProjectId::new();

        let open = DecisionRecord::new(project, DecisionMode::Easy);
        store.upsert_decision(open.id, &open).await.unwrap();
        fs::write(store.record_path(project, DecisionId::new()), "{ not json")
            .await
            .unwrap();

        let loaded = store.fetch_latest_open_decision(project).await.unwrap();
        assert_eq!(loaded.map(|r| r.id), Some(open.id));
    }

    #[tokio::test]
    async fn record_filed_under_wrong_project_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let project = ProjectId::new();
        let stray = DecisionRecord::new(ProjectId::new(), DecisionMode::Easy);
        let path = store.record_path(project, stray.id);
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, serde_json::to_string(&stray).unwrap())
            .await
            .unwrap();

        let result = store.fetch_latest_open_decision(project).await;
        assert!(matches!(
            result,
            Err(RecordStoreError::ProjectMismatch { expected, .. }) if expected == project
        ));
    }

    #[tokio::test]
    async fn upsert_under_foreign_id_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let record = DecisionRecord::new(ProjectId::new(), DecisionMode::Easy);
        let other = DecisionId::new();

        let result = store.upsert_decision(other, &record).await;

        assert!(matches!(result, Err(RecordStoreError::IdMismatch { .. })));
        assert!(!store.record_path(record.project_id, other).exists());
        assert!(!temp.path().join("decisions").exists());
    }

    #[tokio::test]
    async fn leftover_temp_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        let store = FsDecisionRecordStore::new(temp.path());
        let project = ProjectId::new();
        let path = store.record_path(project, DecisionId::new());
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(path.with_extension("json.tmp"), "partial").await.unwrap();

        assert_eq!(store.fetch_latest_open_decision(project).await.unwrap(), None);
    }
}
