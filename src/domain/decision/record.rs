//! Decision record - the value object the whole workflow manipulates.
//!
//! One record exists per (project, open decision cycle). Records are
//! immutable snapshots: the decision store derives a new record for every
//! mutation and stamps `updated_at`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DecisionId, Percentage, ProjectId, Timestamp};
use crate::domain::workflow::WorkflowStep;

use super::{
    CognitiveBias, ConfidenceAssessment, DecisionMode, DecisionPath, Evidence, HypothesisCycle,
    JobsToBeDone, PainPoint, PivotReadiness, PivotType, ProductMarketFit, Quote,
    ReframingResponses, RetentionMetrics, TrajectoryIndicators, UnitEconomics,
};

/// A user's in-progress or completed proceed / patch / pivot decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    // Identity
    pub id: DecisionId,
    pub project_id: ProjectId,
    pub mode: DecisionMode,

    // Workflow state
    #[serde(default)]
    pub current_step: WorkflowStep,
    pub decision: Option<DecisionPath>,
    #[serde(default)]
    pub decision_rationale: String,
    #[serde(default)]
    pub next_actions: Vec<String>,

    // Debiasing inputs
    #[serde(default)]
    pub pre_mortem_insights: Vec<String>,
    #[serde(default)]
    pub reframing_responses: ReframingResponses,
    #[serde(default)]
    pub contradictory_evidence: Vec<Evidence>,

    // Quantitative inputs (detailed mode)
    pub product_market_fit: Option<ProductMarketFit>,
    pub retention_metrics: Option<RetentionMetrics>,
    pub unit_economics: Option<UnitEconomics>,

    // Qualitative inputs
    pub jobs_to_be_done: Option<JobsToBeDone>,
    #[serde(default)]
    pub pain_points: Vec<PainPoint>,
    #[serde(default)]
    pub customer_quotes: Vec<Quote>,

    // Assessment inputs
    pub confidence_assessment: Option<ConfidenceAssessment>,
    pub pivot_readiness: Option<PivotReadiness>,
    pub recommended_pivot_type: Option<PivotType>,
    pub hypothesis_tested: Option<HypothesisCycle>,
    #[serde(default)]
    pub trajectory_indicators: TrajectoryIndicators,

    // Reflection
    #[serde(default)]
    pub lessons_learned: String,
    #[serde(default)]
    pub biases_identified: BTreeSet<CognitiveBias>,
    pub confidence_level: Option<Percentage>,
    #[serde(default)]
    pub external_advisors_consulted: bool,

    // Lifecycle
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl DecisionRecord {
    /// Creates an empty record for a project in the chosen mode.
    pub fn new(project_id: ProjectId, mode: DecisionMode) -> Self {
        let now = Timestamp::now();
        Self {
            id: DecisionId::new(),
            project_id,
            mode,
            current_step: WorkflowStep::first(),
            decision: None,
            decision_rationale: String::new(),
            next_actions: Vec::new(),
            pre_mortem_insights: Vec::new(),
            reframing_responses: ReframingResponses::default(),
            contradictory_evidence: Vec::new(),
            product_market_fit: None,
            retention_metrics: None,
            unit_economics: None,
            jobs_to_be_done: None,
            pain_points: Vec::new(),
            customer_quotes: Vec::new(),
            confidence_assessment: None,
            pivot_readiness: None,
            recommended_pivot_type: None,
            hypothesis_tested: None,
            trajectory_indicators: TrajectoryIndicators::default(),
            lessons_learned: String::new(),
            biases_identified: BTreeSet::new(),
            confidence_level: None,
            external_advisors_consulted: false,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Returns true once the workflow has reached its terminal step.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns the current PMF score, if one has been entered.
    pub fn pmf_score(&self) -> Option<f64> {
        self.product_market_fit.and_then(|pmf| pmf.score)
    }
}

/// Partial update for the reflection fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionUpdate {
    pub lessons_learned: Option<String>,
    pub biases_identified: Option<BTreeSet<CognitiveBias>>,
    pub confidence_level: Option<Percentage>,
    pub external_advisors_consulted: Option<bool>,
}

/// Partial update for the chosen path and its rationale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionUpdate {
    pub decision: Option<DecisionPath>,
    pub rationale: Option<String>,
}
