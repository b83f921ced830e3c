//! WorkflowSession - the service object for one guided decision.
//!
//! A session is constructed once per (user, project) visit and passed to
//! each step by reference. It wires the [`DecisionStore`], the step
//! navigator and the [`PersistenceSynchronizer`] together; steps call the
//! store's mutation methods directly through [`WorkflowSession::store`].

use std::sync::Arc;

use crate::domain::decision::{DecisionMode, DecisionRecord};
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, ProjectId};
use crate::domain::scoring::Scorecard;
use crate::domain::workflow::{
    check_guard, next_step, previous_step, Transition, WorkflowProgress, WorkflowStep,
};
use crate::ports::DecisionRecordStore;

use super::decision_store::DecisionStore;
use super::synchronizer::{LoadOutcome, PersistenceSynchronizer, SyncStatus, SynchronizerConfig};

/// One user's pass through the decision workflow for a project.
pub struct WorkflowSession {
    project_id: ProjectId,
    store: Arc<DecisionStore>,
    sync: PersistenceSynchronizer,
}

impl WorkflowSession {
    /// Loads the project's open decision and starts the save loop.
    ///
    /// A failed load does not prevent opening; it is reported through
    /// [`WorkflowSession::status`] and can be retried with
    /// [`WorkflowSession::retry_load`].
    pub async fn open(
        project_id: ProjectId,
        records: Arc<dyn DecisionRecordStore>,
        config: SynchronizerConfig,
    ) -> (Self, LoadOutcome) {
        let store = Arc::new(DecisionStore::new());
        let mut sync = PersistenceSynchronizer::with_config(Arc::clone(&store), records, config);

        let outcome = sync.load(project_id).await;
        sync.activate();

        tracing::info!(project_id = %project_id, outcome = ?outcome, "Workflow session opened");
        (
            Self {
                project_id,
                store,
                sync,
            },
            outcome,
        )
    }

    /// Retries loading after a failure.
    ///
    /// Never replaces an active record: once a decision is in the store
    /// this returns [`LoadOutcome::AlreadyActive`] without fetching.
    pub async fn retry_load(&self) -> LoadOutcome {
        self.sync.load(self.project_id).await
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// The store that step components mutate.
    pub fn store(&self) -> &Arc<DecisionStore> {
        &self.store
    }

    /// Starts a new decision in `mode`.
    ///
    /// After the active decision is completed this starts the project's
    /// next cycle in its place.
    ///
    /// # Errors
    ///
    /// - `StorageError` while the last load failed, since an open record
    ///   may exist that has not been seen
    /// - `ModeAlreadySelected` if an open decision is already active
    pub fn select_mode(&self, mode: DecisionMode) -> Result<DecisionId, DomainError> {
        if let Some(load_error) = self.sync.status().load_error {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Cannot start a decision until the project's decisions have loaded",
            )
            .with_detail("load_error", load_error));
        }
        self.store.select_mode(self.project_id, mode)
    }

    /// Attempts to move forward from the current step.
    ///
    /// A failed guard is returned as [`Transition::Blocked`], not as an
    /// error. Reaching `complete` marks the record completed.
    ///
    /// # Errors
    ///
    /// - `NoActiveDecision` if no mode has been selected
    pub fn continue_step(&self) -> Result<Transition, DomainError> {
        let record = self.active_record()?;
        let step = record.current_step;
        let transition = next_step(step, record.mode, check_guard(step, &record));

        match &transition {
            Transition::Advanced(WorkflowStep::Complete) => {
                self.store.mark_completed()?;
                tracing::info!(decision_id = %record.id, "Decision completed");
            }
            Transition::Advanced(next) => {
                self.store.set_current_step(*next)?;
                tracing::debug!(decision_id = %record.id, from = %step, to = %next, "Advanced step");
            }
            Transition::Blocked(failure) => {
                tracing::debug!(
                    decision_id = %record.id,
                    step = %step,
                    unmet = failure.unmet.len(),
                    "Step guard not met"
                );
            }
            Transition::Terminal | Transition::NotInSequence { .. } => {}
        }
        Ok(transition)
    }

    /// Moves back one step without checking any guard.
    ///
    /// Returns the new step, or `None` when already at the first step or
    /// when the decision is complete.
    pub fn go_back(&self) -> Result<Option<WorkflowStep>, DomainError> {
        let record = self.active_record()?;
        match previous_step(record.current_step, record.mode) {
            Some(previous) => {
                self.store.set_current_step(previous)?;
                Ok(Some(previous))
            }
            None => Ok(None),
        }
    }

    pub fn current_step(&self) -> Option<WorkflowStep> {
        self.store.record().map(|r| r.current_step)
    }

    pub fn progress(&self) -> Option<WorkflowProgress> {
        self.store
            .record()
            .map(|r| WorkflowProgress::new(r.current_step, r.mode))
    }

    pub fn record(&self) -> Option<Arc<DecisionRecord>> {
        self.store.record()
    }

    /// Every derived score for the active record.
    pub fn scorecard(&self) -> Option<Scorecard> {
        self.store.record().map(|r| Scorecard::for_record(&r))
    }

    pub fn status(&self) -> SyncStatus {
        self.sync.status()
    }

    pub fn dismiss_save_error(&self) {
        self.sync.dismiss_save_error();
    }

    /// Stops the save loop. Unsaved changes inside the debounce window
    /// are not written.
    pub async fn close(mut self) {
        self.sync.deactivate().await;
        tracing::info!(project_id = %self.project_id, "Workflow session closed");
    }

    fn active_record(&self) -> Result<Arc<DecisionRecord>, DomainError> {
        self.store.record().ok_or_else(|| {
            DomainError::new(
                ErrorCode::NoActiveDecision,
                "No decision is active; select a mode first",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryDecisionRecordStore;
    use crate::domain::decision::{
        ConfidenceAssessment, DecisionPath, DecisionUpdate, ReflectionUpdate,
        ReframingResponsesPatch,
    };
    use crate::domain::workflow::Requirement;

    async fn open_empty() -> (WorkflowSession, InMemoryDecisionRecordStore) {
        let records = InMemoryDecisionRecordStore::new();
        let (session, outcome) = WorkflowSession::open(
            ProjectId::new(),
            Arc::new(records.clone()),
            SynchronizerConfig::default(),
        )
        .await;
        assert_eq!(outcome, LoadOutcome::Empty);
        (session, records)
    }

    fn fill_easy_mode(session: &WorkflowSession) {
        let store = session.store();
        store
            .update_pre_mortem_insights(vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        store
            .update_reframing_responses(ReframingResponsesPatch {
                starting_over: Some("yes".into()),
                outsider_view: Some("narrow".into()),
                opposite_belief: Some("market is early".into()),
            })
            .unwrap();
        store
            .update_reflection(ReflectionUpdate {
                lessons_learned: Some("ship smaller".into()),
                ..Default::default()
            })
            .unwrap();
        store
            .update_confidence_assessment(ConfidenceAssessment::default())
            .unwrap();
        store
            .update_decision(DecisionUpdate {
                decision: Some(DecisionPath::Proceed),
                rationale: Some("retention is climbing".into()),
            })
            .unwrap();
        store
            .set_next_actions(vec!["hire".into(), "raise".into(), "launch".into()])
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn continue_without_mode_is_an_error() {
        let (session, _) = open_empty().await;
        let err = session.continue_step().unwrap_err();
        assert_eq!(err.code, ErrorCode::NoActiveDecision);
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_guard_keeps_current_step() {
        let (session, _) = open_empty().await;
        session.select_mode(DecisionMode::Easy).unwrap();

        let transition = session.continue_step().unwrap();
        match transition {
            Transition::Blocked(failure) => {
                assert_eq!(failure.unmet, vec![Requirement::PreMortemInsights])
            }
            other => panic!("expected blocked, got {:?}", other),
        }
        assert_eq!(session.current_step(), Some(WorkflowStep::PreMortem));
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn easy_mode_runs_to_completion() {
        let (session, _) = open_empty().await;
        session.select_mode(DecisionMode::Easy).unwrap();
        fill_easy_mode(&session);

        let mut visited = vec![];
        while let Transition::Advanced(step) = session.continue_step().unwrap() {
            visited.push(step);
        }

        assert_eq!(
            visited,
            vec![
                WorkflowStep::Progress,
                WorkflowStep::Reflection,
                WorkflowStep::Confidence,
                WorkflowStep::Decision,
                WorkflowStep::Complete
            ]
        );
        assert!(session.record().unwrap().is_completed());
        assert_eq!(session.continue_step().unwrap(), Transition::Terminal);
        assert_eq!(session.go_back().unwrap(), None);
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn continuing_again_after_going_back_lands_on_same_step() {
        let (session, _) = open_empty().await;
        session.select_mode(DecisionMode::Easy).unwrap();
        fill_easy_mode(&session);

        assert_eq!(
            session.continue_step().unwrap(),
            Transition::Advanced(WorkflowStep::Progress)
        );
        assert_eq!(session.go_back().unwrap(), Some(WorkflowStep::PreMortem));

        let before = session.record().unwrap();
        assert_eq!(
            session.continue_step().unwrap(),
            Transition::Advanced(WorkflowStep::Progress)
        );
        let after = session.record().unwrap();

        assert!(after.updated_at.is_after(&before.updated_at));
        assert_eq!(after.pre_mortem_insights, before.pre_mortem_insights);
        assert_eq!(after.reframing_responses, before.reframing_responses);
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn go_back_at_first_step_is_a_no_op() {
        let (session, _) = open_empty().await;
        session.select_mode(DecisionMode::Detailed).unwrap();
        let revision = session.store().revision();

        assert_eq!(session.go_back().unwrap(), None);
        assert_eq!(session.store().revision(), revision);
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn select_mode_is_refused_while_load_failed() {
        let records = InMemoryDecisionRecordStore::new();
        records.set_failing_reads(true);
        let (session, outcome) = WorkflowSession::open(
            ProjectId::new(),
            Arc::new(records.clone()),
            SynchronizerConfig::default(),
        )
        .await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)));

        let err = session.select_mode(DecisionMode::Easy).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        records.set_failing_reads(false);
        assert_eq!(session.retry_load().await, LoadOutcome::Empty);
        assert!(session.select_mode(DecisionMode::Easy).is_ok());
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn retry_load_on_healthy_session_keeps_edits() {
        let (session, records) = open_empty().await;
        let id = session.select_mode(DecisionMode::Easy).unwrap();
        session
            .store()
            .update_pre_mortem_insights(vec!["a".into(), "b".into(), "c".into()])
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(300)).await;

        assert_eq!(session.retry_load().await, LoadOutcome::AlreadyActive(id));
        assert_eq!(session.record().unwrap().pre_mortem_insights.len(), 3);

        tokio::time::sleep(SynchronizerConfig::default().debounce * 2).await;
        assert_eq!(records.write_count(), 1);
        assert_eq!(records.get(id).await.unwrap().pre_mortem_insights.len(), 3);
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn completed_decision_makes_way_for_next_cycle() {
        let (session, records) = open_empty().await;
        let first = session.select_mode(DecisionMode::Easy).unwrap();
        fill_easy_mode(&session);
        while let Transition::Advanced(_) = session.continue_step().unwrap() {}
        assert!(session.record().unwrap().is_completed());

        let second = session.select_mode(DecisionMode::Detailed).unwrap();
        assert_ne!(first, second);
        assert_eq!(session.current_step(), Some(WorkflowStep::PreMortem));

        tokio::time::sleep(SynchronizerConfig::default().debounce * 2).await;
        assert!(records.get(first).await.unwrap().is_completed());
        assert!(records.get(second).await.is_some());
        session.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn scorecard_and_progress_follow_record() {
        let (session, _) = open_empty().await;
        assert!(session.scorecard().is_none());
        assert!(session.progress().is_none());

        session.select_mode(DecisionMode::Easy).unwrap();
        let progress = session.progress().unwrap();
        assert_eq!(progress.position, Some(1));
        assert!(session.scorecard().is_some());
        session.close().await;
    }
}
