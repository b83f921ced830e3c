//! DecisionStore - in-memory owner of the active decision record.
//!
//! Every mutation derives a new record from the current one, stamps
//! `updated_at` and publishes the result as a new [`StoreSnapshot`] on a
//! `tokio::sync::watch` channel. Observers (the persistence synchronizer,
//! UI bindings) subscribe to that channel instead of reaching into the
//! store.
//!
//! Mutations are applied synchronously and in call order. Failures are
//! returned as [`DomainError`] values and leave the record untouched.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::decision::{
    with_added, with_updated, without, ConfidenceAssessment, DecisionMode, DecisionRecord,
    DecisionUpdate, Evidence, EvidencePatch, HypothesisCycle, JobsToBeDone, PainPoint,
    PainPointPatch, PivotReadiness, PivotType, ProductMarketFitPatch, Quote, QuotePatch,
    ReflectionUpdate, ReframingResponsesPatch, RetentionMetricsPatch, TrajectoryIndicators,
    UnitEconomicsPatch,
};
use crate::domain::foundation::{
    DecisionId, DomainError, EntryId, ErrorCode, ProjectId, Timestamp,
};
use crate::domain::workflow::WorkflowStep;

/// What produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// The store was created and has not changed yet.
    Initial,
    /// A user-facing mutation. Persisted by the synchronizer.
    Mutation,
    /// A record loaded from storage. Never persisted back.
    Hydration,
    /// The active record was dropped.
    Cleared,
}

/// A revisioned view of the store's contents.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Increases by one on every published change.
    pub revision: u64,
    pub origin: ChangeOrigin,
    pub record: Option<Arc<DecisionRecord>>,
}

impl StoreSnapshot {
    fn empty() -> Self {
        Self {
            revision: 0,
            origin: ChangeOrigin::Initial,
            record: None,
        }
    }

    /// Returns true if this snapshot should be written to storage.
    pub fn needs_persisting(&self) -> bool {
        self.origin == ChangeOrigin::Mutation && self.record.is_some()
    }
}

/// Holder of the current decision record for one workflow session.
#[derive(Debug)]
pub struct DecisionStore {
    state: watch::Sender<StoreSnapshot>,
}

impl Default for DecisionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreSnapshot::empty());
        Self { state }
    }

    /// Subscribes to every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }

    /// Returns the latest snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    /// Returns the active record, if any.
    pub fn record(&self) -> Option<Arc<DecisionRecord>> {
        self.state.borrow().record.clone()
    }

    /// Returns the revision of the latest snapshot.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Returns true if a record is active.
    pub fn has_record(&self) -> bool {
        self.state.borrow().record.is_some()
    }

    // ════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ════════════════════════════════════════════════════════════════════

    /// Creates the record for `project_id` in the chosen mode.
    ///
    /// The mode is fixed for the life of the record. A completed record is
    /// replaced, which starts the project's next decision cycle.
    ///
    /// # Errors
    ///
    /// - `ModeAlreadySelected` if an open record is already active
    pub fn select_mode(
        &self,
        project_id: ProjectId,
        mode: DecisionMode,
    ) -> Result<DecisionId, DomainError> {
        let mut outcome = Err(DomainError::new(
            ErrorCode::InternalError,
            "Mode selection did not run",
        ));

        self.state.send_if_modified(|snapshot| {
            if let Some(existing) = snapshot.record.as_deref().filter(|r| !r.is_completed()) {
                outcome = Err(DomainError::new(
                    ErrorCode::ModeAlreadySelected,
                    format!("Decision {} already uses {} mode", existing.id, existing.mode),
                )
                .with_detail("decision_id", existing.id.to_string()));
                return false;
            }

            let record = DecisionRecord::new(project_id, mode);
            outcome = Ok(record.id);
            snapshot.record = Some(Arc::new(record));
            snapshot.origin = ChangeOrigin::Mutation;
            snapshot.revision += 1;
            true
        });

        match &outcome {
            Ok(decision_id) => tracing::info!(
                decision_id = %decision_id,
                project_id = %project_id,
                mode = %mode,
                "Decision started"
            ),
            Err(err) => tracing::warn!(project_id = %project_id, error = %err, "Mode selection rejected"),
        }
        outcome
    }

    /// Fills an empty store with a record loaded from storage.
    ///
    /// Hydration is not a user edit: it does not stamp `updated_at` and the
    /// synchronizer does not write it back. Returns false, leaving the
    /// store untouched, when a record is already active.
    pub fn hydrate(&self, record: DecisionRecord) -> bool {
        let decision_id = record.id;
        let hydrated = self.state.send_if_modified(|snapshot| {
            if snapshot.record.is_some() {
                return false;
            }
            snapshot.record = Some(Arc::new(record));
            snapshot.origin = ChangeOrigin::Hydration;
            snapshot.revision += 1;
            true
        });

        if hydrated {
            tracing::debug!(decision_id = %decision_id, "Hydrated decision store");
        } else {
            tracing::debug!(decision_id = %decision_id, "Store already holds a record; hydration skipped");
        }
        hydrated
    }

    /// Drops the active record.
    pub fn clear(&self) {
        self.state.send_modify(|snapshot| {
            snapshot.record = None;
            snapshot.origin = ChangeOrigin::Cleared;
            snapshot.revision += 1;
        });
    }

    /// Moves the record to `step`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the mode never visits `step`
    pub fn set_current_step(&self, step: WorkflowStep) -> Result<(), DomainError> {
        self.mutate("set_current_step", |record| {
            if !step.belongs_to(record.mode) {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("Step {} is not part of {} mode", step, record.mode),
                )
                .with_detail("step", step.as_str()));
            }
            Ok(DecisionRecord {
                current_step: step,
                ..record.clone()
            })
        })
    }

    /// Marks the record terminal. No further mutations are accepted.
    pub fn mark_completed(&self) -> Result<(), DomainError> {
        self.mutate("mark_completed", |record| {
            Ok(DecisionRecord {
                current_step: WorkflowStep::Complete,
                completed_at: Some(Timestamp::now_after(&record.updated_at)),
                ..record.clone()
            })
        })
    }

    // ════════════════════════════════════════════════════════════════════
    // Debiasing inputs
    // ════════════════════════════════════════════════════════════════════

    pub fn update_pre_mortem_insights(&self, insights: Vec<String>) -> Result<(), DomainError> {
        self.mutate("update_pre_mortem_insights", |record| {
            Ok(DecisionRecord {
                pre_mortem_insights: insights,
                ..record.clone()
            })
        })
    }

    /// Merges the answered prompts over the previous responses.
    pub fn update_reframing_responses(
        &self,
        patch: ReframingResponsesPatch,
    ) -> Result<(), DomainError> {
        self.mutate("update_reframing_responses", |record| {
            Ok(DecisionRecord {
                reframing_responses: patch.apply_to(&record.reframing_responses),
                ..record.clone()
            })
        })
    }

    pub fn add_contradictory_evidence(&self, evidence: Evidence) -> Result<(), DomainError> {
        self.mutate("add_contradictory_evidence", |record| {
            Ok(DecisionRecord {
                contradictory_evidence: with_added(&record.contradictory_evidence, evidence)?,
                ..record.clone()
            })
        })
    }

    pub fn update_contradictory_evidence(
        &self,
        id: EntryId,
        patch: EvidencePatch,
    ) -> Result<(), DomainError> {
        self.mutate("update_contradictory_evidence", |record| {
            Ok(DecisionRecord {
                contradictory_evidence: with_updated(&record.contradictory_evidence, id, |e| {
                    patch.apply_to(e)
                })?,
                ..record.clone()
            })
        })
    }

    pub fn delete_contradictory_evidence(&self, id: EntryId) -> Result<(), DomainError> {
        self.mutate("delete_contradictory_evidence", |record| {
            Ok(DecisionRecord {
                contradictory_evidence: without(&record.contradictory_evidence, id)?,
                ..record.clone()
            })
        })
    }

    // ════════════════════════════════════════════════════════════════════
    // Quantitative inputs
    // ════════════════════════════════════════════════════════════════════

    pub fn update_product_market_fit(
        &self,
        patch: ProductMarketFitPatch,
    ) -> Result<(), DomainError> {
        self.mutate("update_product_market_fit", |record| {
            Ok(DecisionRecord {
                product_market_fit: Some(patch.apply_to(record.product_market_fit.as_ref())),
                ..record.clone()
            })
        })
    }

    pub fn update_retention_metrics(
        &self,
        patch: RetentionMetricsPatch,
    ) -> Result<(), DomainError> {
        self.mutate("update_retention_metrics", |record| {
            Ok(DecisionRecord {
                retention_metrics: Some(patch.apply_to(record.retention_metrics.as_ref())),
                ..record.clone()
            })
        })
    }

    pub fn update_unit_economics(&self, patch: UnitEconomicsPatch) -> Result<(), DomainError> {
        self.mutate("update_unit_economics", |record| {
            Ok(DecisionRecord {
                unit_economics: Some(patch.apply_to(record.unit_economics.as_ref())),
                ..record.clone()
            })
        })
    }

    // ════════════════════════════════════════════════════════════════════
    // Qualitative inputs
    // ════════════════════════════════════════════════════════════════════

    /// Replaces the jobs-to-be-done wholesale.
    pub fn update_jobs_to_be_done(&self, jobs: JobsToBeDone) -> Result<(), DomainError> {
        self.mutate("update_jobs_to_be_done", |record| {
            Ok(DecisionRecord {
                jobs_to_be_done: Some(jobs),
                ..record.clone()
            })
        })
    }

    pub fn add_pain_point(&self, pain_point: PainPoint) -> Result<(), DomainError> {
        self.mutate("add_pain_point", |record| {
            Ok(DecisionRecord {
                pain_points: with_added(&record.pain_points, pain_point)?,
                ..record.clone()
            })
        })
    }

    pub fn update_pain_point(&self, id: EntryId, patch: PainPointPatch) -> Result<(), DomainError> {
        self.mutate("update_pain_point", |record| {
            Ok(DecisionRecord {
                pain_points: with_updated(&record.pain_points, id, |p| patch.apply_to(p))?,
                ..record.clone()
            })
        })
    }

    pub fn delete_pain_point(&self, id: EntryId) -> Result<(), DomainError> {
        self.mutate("delete_pain_point", |record| {
            Ok(DecisionRecord {
                pain_points: without(&record.pain_points, id)?,
                ..record.clone()
            })
        })
    }

    pub fn add_quote(&self, quote: Quote) -> Result<(), DomainError> {
        self.mutate("add_quote", |record| {
            Ok(DecisionRecord {
                customer_quotes: with_added(&record.customer_quotes, quote)?,
                ..record.clone()
            })
        })
    }

    pub fn update_quote(&self, id: EntryId, patch: QuotePatch) -> Result<(), DomainError> {
        self.mutate("update_quote", |record| {
            Ok(DecisionRecord {
                customer_quotes: with_updated(&record.customer_quotes, id, |q| patch.apply_to(q))?,
                ..record.clone()
            })
        })
    }

    pub fn delete_quote(&self, id: EntryId) -> Result<(), DomainError> {
        self.mutate("delete_quote", |record| {
            Ok(DecisionRecord {
                customer_quotes: without(&record.customer_quotes, id)?,
                ..record.clone()
            })
        })
    }

    // ════════════════════════════════════════════════════════════════════
    // Assessment inputs
    // ════════════════════════════════════════════════════════════════════

    pub fn update_confidence_assessment(
        &self,
        assessment: ConfidenceAssessment,
    ) -> Result<(), DomainError> {
        self.mutate("update_confidence_assessment", |record| {
            Ok(DecisionRecord {
                confidence_assessment: Some(assessment),
                ..record.clone()
            })
        })
    }

    pub fn update_pivot_readiness(&self, readiness: PivotReadiness) -> Result<(), DomainError> {
        self.mutate("update_pivot_readiness", |record| {
            Ok(DecisionRecord {
                pivot_readiness: Some(readiness),
                ..record.clone()
            })
        })
    }

    pub fn set_recommended_pivot_type(
        &self,
        pivot_type: Option<PivotType>,
    ) -> Result<(), DomainError> {
        self.mutate("set_recommended_pivot_type", |record| {
            Ok(DecisionRecord {
                recommended_pivot_type: pivot_type,
                ..record.clone()
            })
        })
    }

    /// Replaces the tested hypothesis wholesale.
    pub fn update_hypothesis(&self, cycle: HypothesisCycle) -> Result<(), DomainError> {
        self.mutate("update_hypothesis", |record| {
            Ok(DecisionRecord {
                hypothesis_tested: Some(cycle),
                ..record.clone()
            })
        })
    }

    /// Merges the tagged indicators over the previous tags.
    pub fn update_trajectory_indicators(
        &self,
        patch: TrajectoryIndicators,
    ) -> Result<(), DomainError> {
        self.mutate("update_trajectory_indicators", |record| {
            Ok(DecisionRecord {
                trajectory_indicators: record.trajectory_indicators.merged_with(&patch),
                ..record.clone()
            })
        })
    }

    // ════════════════════════════════════════════════════════════════════
    // Reflection and decision
    // ════════════════════════════════════════════════════════════════════

    pub fn update_reflection(&self, update: ReflectionUpdate) -> Result<(), DomainError> {
        self.mutate("update_reflection", |record| {
            let ReflectionUpdate {
                lessons_learned,
                biases_identified,
                confidence_level,
                external_advisors_consulted,
            } = update;
            Ok(DecisionRecord {
                lessons_learned: lessons_learned.unwrap_or_else(|| record.lessons_learned.clone()),
                biases_identified: biases_identified
                    .unwrap_or_else(|| record.biases_identified.clone()),
                confidence_level: confidence_level.or(record.confidence_level),
                external_advisors_consulted: external_advisors_consulted
                    .unwrap_or(record.external_advisors_consulted),
                ..record.clone()
            })
        })
    }

    pub fn update_decision(&self, update: DecisionUpdate) -> Result<(), DomainError> {
        self.mutate("update_decision", |record| {
            Ok(DecisionRecord {
                decision: update.decision.or(record.decision),
                decision_rationale: update
                    .rationale
                    .unwrap_or_else(|| record.decision_rationale.clone()),
                ..record.clone()
            })
        })
    }

    pub fn set_next_actions(&self, actions: Vec<String>) -> Result<(), DomainError> {
        self.mutate("set_next_actions", |record| {
            Ok(DecisionRecord {
                next_actions: actions,
                ..record.clone()
            })
        })
    }

    /// Applies `change` to the active record and publishes the result.
    ///
    /// `id`, `project_id`, `mode` and `created_at` are carried over from
    /// the current record whatever `change` returns.
    fn mutate<F>(&self, operation: &'static str, change: F) -> Result<(), DomainError>
    where
        F: FnOnce(&DecisionRecord) -> Result<DecisionRecord, DomainError>,
    {
        let mut outcome = Ok(());
        let mut decision_id = None;

        self.state.send_if_modified(|snapshot| {
            let Some(current) = snapshot.record.as_deref() else {
                outcome = Err(DomainError::new(
                    ErrorCode::NoActiveDecision,
                    "No decision is active; select a mode first",
                ));
                return false;
            };
            decision_id = Some(current.id);

            if current.is_completed() {
                outcome = Err(DomainError::new(
                    ErrorCode::DecisionCompleted,
                    format!("Decision {} is already completed", current.id),
                )
                .with_detail("decision_id", current.id.to_string()));
                return false;
            }

            let next = change(current).map(|next| DecisionRecord {
                id: current.id,
                project_id: current.project_id,
                mode: current.mode,
                created_at: current.created_at,
                updated_at: Timestamp::now_after(&current.updated_at),
                ..next
            });

            match next {
                Ok(next) => {
                    snapshot.record = Some(Arc::new(next));
                    snapshot.origin = ChangeOrigin::Mutation;
                    snapshot.revision += 1;
                    true
                }
                Err(err) => {
                    outcome = Err(err);
                    false
                }
            }
        });

        match (&outcome, decision_id) {
            (Ok(()), Some(id)) => {
                tracing::debug!(decision_id = %id, operation, "Decision record updated")
            }
            (Err(err), id) => tracing::warn!(
                decision_id = ?id,
                operation,
                error = %err,
                "Decision record mutation rejected"
            ),
            _ => {}
        }
        outcome
    }
}
