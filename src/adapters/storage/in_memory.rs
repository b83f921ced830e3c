//! In-Memory Decision Record Store Adapter
//!
//! Keeps records in a map keyed by decision id. Useful for testing and
//! development: it counts writes and can be told to fail reads or writes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{DecisionId, ProjectId};
use crate::ports::{DecisionRecordStore, RecordStoreError};

/// In-memory storage for decision records
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionRecordStore {
    records: Arc<RwLock<HashMap<DecisionId, DecisionRecord>>>,
    writes: Arc<AtomicUsize>,
    failing_writes: Arc<AtomicUsize>,
    failing_reads: Arc<AtomicBool>,
    write_delay: Option<Duration>,
}

impl InMemoryDecisionRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every write by `delay` before it lands
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }

    /// Seed a record without counting it as a write
    pub async fn insert(&self, record: DecisionRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Get a stored record by id
    pub async fn get(&self, id: DecisionId) -> Option<DecisionRecord> {
        self.records.read().await.get(&id).cloned()
    }

    /// Number of successful upserts so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the next `count` upserts fail
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    /// Make reads fail until switched off
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    fn take_write_failure(&self) -> bool {
        self.failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl DecisionRecordStore for InMemoryDecisionRecordStore {
    async fn fetch_latest_open_decision(
        &self,
        project_id: ProjectId,
    ) -> Result<Option<DecisionRecord>, RecordStoreError> {
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(RecordStoreError::Unavailable(
                "simulated read failure".to_string(),
            ));
        }

        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.project_id == project_id && !r.is_completed())
            .max_by_key(|r| r.created_at)
            .cloned())
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
        if let Some(delay) = self.write_delay {
            tokio::time::sleep(delay).await;
        }
        if self.take_write_failure() {
            return Err(RecordStoreError::Unavailable(
                "simulated write failure".to_string(),
            ));
        }

        self.records.write().await.insert(id, record.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
