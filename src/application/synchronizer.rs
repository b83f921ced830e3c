//! PersistenceSynchronizer - loads the open decision and saves changes.
//!
//! Two independent duties:
//!
//! 1. **Load** - on open, fetch the latest open record of the project and
//!    hydrate the [`DecisionStore`] with it. An absent record leaves the
//!    store empty so the user can pick a mode. A record already active in
//!    the store is never replaced by a load.
//! 2. **Save** - a background loop watches store snapshots, pushes a
//!    [`Debouncer`] deadline back on every user mutation and writes the
//!    latest snapshot once the window passes quietly. When a different
//!    record takes over the store while a save is pending, the pending
//!    record is written first.
//!
//! ## Graceful Shutdown
//!
//! `deactivate` signals the loop through a watch channel. A pending
//! deadline is dropped without a trailing write; a write already started
//! runs to completion before the loop exits.
//!
//! Failures never propagate past this module: they are recorded in
//! [`SyncStatus`] and the in-memory record is left as it was.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SyncConfig;
use crate::domain::foundation::{DecisionId, ProjectId, Timestamp};
use crate::ports::DecisionRecordStore;

use super::debounce::Debouncer;
use super::decision_store::{ChangeOrigin, DecisionStore, StoreSnapshot};

/// Configuration for the save loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynchronizerConfig {
    /// Quiet period after the last mutation before a save is issued.
    pub debounce: Duration,
}

impl Default for SynchronizerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
        }
    }
}

impl SynchronizerConfig {
    /// Create config with a custom debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl From<&SyncConfig> for SynchronizerConfig {
    fn from(config: &SyncConfig) -> Self {
        Self {
            debounce: config.debounce(),
        }
    }
}

/// Load and save state, exposed to the caller as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub loading: bool,
    /// Set when the last load failed; steps should not render until a
    /// retry succeeds.
    pub load_error: Option<String>,
    pub saving: bool,
    /// Set when the last save failed; dismissible and non-blocking.
    pub save_error: Option<String>,
    pub last_saved_at: Option<Timestamp>,
    /// Number of successful writes this session.
    pub writes: u64,
}

impl SyncStatus {
    /// Returns true when the workflow may render steps.
    pub fn is_ready(&self) -> bool {
        !self.loading && self.load_error.is_none()
    }
}

/// Result of loading a project's open decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// An open record was found and hydrated into the store.
    Resumed(DecisionId),
    /// The project has no open record; the store is empty.
    Empty,
    /// The store already held a record, which was left untouched.
    AlreadyActive(DecisionId),
    /// The fetch failed; the message is also kept in `SyncStatus`.
    Failed(String),
}

/// Keeps a [`DecisionStore`] in step with a [`DecisionRecordStore`].
pub struct PersistenceSynchronizer {
    store: Arc<DecisionStore>,
    records: Arc<dyn DecisionRecordStore>,
    config: SynchronizerConfig,
    status: Arc<watch::Sender<SyncStatus>>,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl PersistenceSynchronizer {
    /// Create a synchronizer with default configuration.
    pub fn new(store: Arc<DecisionStore>, records: Arc<dyn DecisionRecordStore>) -> Self {
        Self::with_config(store, records, SynchronizerConfig::default())
    }

    /// Create a synchronizer with custom configuration.
    pub fn with_config(
        store: Arc<DecisionStore>,
        records: Arc<dyn DecisionRecordStore>,
        config: SynchronizerConfig,
    ) -> Self {
        let (status, _) = watch::channel(SyncStatus::default());
        Self {
            store,
            records,
            config,
            status: Arc::new(status),
            shutdown: None,
            task: None,
        }
    }

    pub fn config(&self) -> &SynchronizerConfig {
        &self.config
    }

    /// Returns the current status.
    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    /// Subscribes to status changes.
    pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// Clears a surfaced save error.
    pub fn dismiss_save_error(&self) {
        self.status.send_if_modified(|status| status.save_error.take().is_some());
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Fetches the latest open record of `project_id` into an empty store.
    ///
    /// Can be called again after a failure to retry. Once a record is
    /// active, loading does nothing and reports
    /// [`LoadOutcome::AlreadyActive`].
    pub async fn load(&self, project_id: ProjectId) -> LoadOutcome {
        if let Some(active) = self.store.record() {
            tracing::debug!(decision_id = %active.id, "Decision already active; load skipped");
            return LoadOutcome::AlreadyActive(active.id);
        }

        self.status.send_modify(|status| status.loading = true);
        tracing::debug!(project_id = %project_id, "Loading open decision");

        let outcome = match self.records.fetch_latest_open_decision(project_id).await {
            Ok(Some(record)) => {
                let id = record.id;
                if self.store.hydrate(record) {
                    tracing::info!(decision_id = %id, project_id = %project_id, "Resumed open decision");
                    LoadOutcome::Resumed(id)
                } else {
                    self.already_active()
                }
            }
            Ok(None) if self.store.has_record() => self.already_active(),
            Ok(None) => {
                tracing::info!(project_id = %project_id, "No open decision for project");
                LoadOutcome::Empty
            }
            Err(err) => {
                tracing::error!(project_id = %project_id, error = %err, "Failed to load decision");
                LoadOutcome::Failed(err.to_string())
            }
        };

        self.status.send_modify(|status| {
            status.loading = false;
            status.load_error = match &outcome {
                LoadOutcome::Failed(message) => Some(message.clone()),
                _ => None,
            };
        });
        outcome
    }

    // A record was started while the fetch was in flight.
    fn already_active(&self) -> LoadOutcome {
        match self.store.record() {
            Some(active) => LoadOutcome::AlreadyActive(active.id),
            None => LoadOutcome::Empty,
        }
    }

    /// Starts the background save loop. Does nothing if already active.
    pub fn activate(&mut self) {
        if self.task.is_some() {
            return;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let save_loop = SaveLoop {
            changes: self.store.subscribe(),
            records: Arc::clone(&self.records),
            status: Arc::clone(&self.status),
            debouncer: Debouncer::new(self.config.debounce),
            pending: None,
        };

        tracing::debug!(debounce_ms = self.config.debounce.as_millis() as u64, "Save loop activated");
        self.task = Some(tokio::spawn(save_loop.run(shutdown_rx)));
        self.shutdown = Some(shutdown_tx);
    }

    /// Stops the save loop and waits for it to exit.
    ///
    /// A pending debounce is cancelled without writing. A write already in
    /// flight completes first.
    pub async fn deactivate(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::error!(error = %err, "Save loop terminated abnormally");
            }
            tracing::debug!("Save loop deactivated");
        }
    }
}

impl Drop for PersistenceSynchronizer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
    }
}

struct SaveLoop {
    changes: watch::Receiver<StoreSnapshot>,
    records: Arc<dyn DecisionRecordStore>,
    status: Arc<watch::Sender<SyncStatus>>,
    debouncer: Debouncer,
    /// Latest user mutation not yet written.
    pending: Option<StoreSnapshot>,
}

impl SaveLoop {
    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        if self.debouncer.is_pending() {
                            tracing::debug!("Dropping pending save on shutdown");
                        }
                        break;
                    }
                }

                changed = self.changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = self.changes.borrow_and_update().clone();
                    match snapshot.origin {
                        ChangeOrigin::Mutation => {
                            if let Some(previous) = self.pending.take() {
                                if record_id(&previous) != record_id(&snapshot) {
                                    self.persist(&previous).await;
                                }
                            }
                            self.pending = Some(snapshot);
                            self.debouncer.reschedule();
                        }
                        ChangeOrigin::Hydration | ChangeOrigin::Cleared => {
                            self.pending = None;
                            self.debouncer.cancel();
                        }
                        ChangeOrigin::Initial => {}
                    }
                }

                _ = self.debouncer.wait(), if self.debouncer.is_pending() => {
                    self.debouncer.cancel();
                    if let Some(snapshot) = self.pending.take() {
                        if snapshot.needs_persisting() {
                            self.persist(&snapshot).await;
                        }
                    }
                }
            }
        }
    }

    async fn persist(&self, snapshot: &StoreSnapshot) {
        let Some(record) = snapshot.record.as_deref() else {
            return;
        };

        self.status.send_modify(|status| status.saving = true);
        let result = self.records.upsert_decision(record.id, record).await;

        match result {
            Ok(()) => {
                tracing::debug!(
                    decision_id = %record.id,
                    revision = snapshot.revision,
                    step = %record.current_step,
                    "Decision saved"
                );
                self.status.send_modify(|status| {
                    status.saving = false;
                    status.save_error = None;
                    status.last_saved_at = Some(Timestamp::now());
                    status.writes += 1;
                });
            }
            Err(err) => {
                tracing::warn!(
                    decision_id = %record.id,
                    revision = snapshot.revision,
                    error = %err,
                    "Decision save failed; keeping in-memory record"
                );
                self.status.send_modify(|status| {
                    status.saving = false;
                    status.save_error = Some(err.to_string());
                });
            }
        }
    }
}

fn record_id(snapshot: &StoreSnapshot) -> Option<DecisionId> {
    snapshot.record.as_ref().map(|record| record.id)
}
