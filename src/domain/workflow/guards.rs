//! Completion guards - what each step needs before the user may continue.
//!
//! A guard never fails fast: it collects every unmet requirement so the
//! caller can show them all at once.

use std::fmt;

use thiserror::Error;

use crate::domain::decision::{DecisionMode, DecisionRecord};

use super::WorkflowStep;

/// Number of pre-mortem insights that must be filled in.
pub const PRE_MORTEM_INSIGHTS: usize = 3;

/// Minimum number of non-blank next actions for the decision step.
pub const MIN_NEXT_ACTIONS: usize = 3;

/// A single condition a step requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Requirement {
    PreMortemInsights,
    ReframingResponses,
    ProductMarketFitScore,
    LessonsLearned,
    ConfidenceAssessment,
    DecisionPath,
    DecisionRationale,
    NextActions,
    ContradictoryEvidence,
    FunctionalJob,
    PainPoint,
    CustomerQuote,
    Hypothesis,
    HypothesisOutcome,
    TrajectoryIndicators,
    PivotReadiness,
}

impl Requirement {
    /// Human-readable description of what is missing.
    pub fn description(&self) -> &'static str {
        match self {
            Requirement::PreMortemInsights => "answer all three pre-mortem prompts",
            Requirement::ReframingResponses => "answer all three reframing prompts",
            Requirement::ProductMarketFitScore => "enter a product-market fit score",
            Requirement::LessonsLearned => "write down the lessons learned",
            Requirement::ConfidenceAssessment => "rate your confidence in each dimension",
            Requirement::DecisionPath => "choose proceed, patch or pivot",
            Requirement::DecisionRationale => "explain the rationale for the decision",
            Requirement::NextActions => "list at least three next actions",
            Requirement::ContradictoryEvidence => "record at least one piece of contradictory evidence",
            Requirement::FunctionalJob => "describe the functional job to be done",
            Requirement::PainPoint => "record at least one pain point",
            Requirement::CustomerQuote => "record at least one customer quote",
            Requirement::Hypothesis => "state the hypothesis you tested",
            Requirement::HypothesisOutcome => "record the hypothesis outcome",
            Requirement::TrajectoryIndicators => "tag all four trajectory indicators",
            Requirement::PivotReadiness => "complete the PIVOT readiness checklist",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A step's guard did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot continue from {step}: {} requirement(s) unmet", unmet.len())]
pub struct GuardFailure {
    pub step: WorkflowStep,
    pub unmet: Vec<Requirement>,
}

impl GuardFailure {
    pub fn new(step: WorkflowStep, unmet: Vec<Requirement>) -> Self {
        Self { step, unmet }
    }

    /// Returns true if the given requirement is among the unmet ones.
    pub fn is_missing(&self, requirement: Requirement) -> bool {
        self.unmet.contains(&requirement)
    }
}

/// Checks whether `record` satisfies the guard of `step`.
pub fn check_guard(step: WorkflowStep, record: &DecisionRecord) -> Result<(), GuardFailure> {
    let unmet = unmet_requirements(step, record);
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(GuardFailure::new(step, unmet))
    }
}

fn unmet_requirements(step: WorkflowStep, record: &DecisionRecord) -> Vec<Requirement> {
    let mut unmet = Vec::new();
    let mut require = |ok: bool, requirement: Requirement| {
        if !ok {
            unmet.push(requirement);
        }
    };

    match step {
        WorkflowStep::PreMortem => {
            let answered = record
                .pre_mortem_insights
                .iter()
                .take(PRE_MORTEM_INSIGHTS)
                .filter(|insight| !is_blank(insight))
                .count();
            require(answered == PRE_MORTEM_INSIGHTS, Requirement::PreMortemInsights);
        }
        WorkflowStep::Progress => {
            require(
                record.reframing_responses.is_complete(),
                Requirement::ReframingResponses,
            );
            if record.mode == DecisionMode::Detailed {
                require(
                    record.pmf_score().is_some(),
                    Requirement::ProductMarketFitScore,
                );
            }
        }
        WorkflowStep::Reflection => {
            require(!is_blank(&record.lessons_learned), Requirement::LessonsLearned);
        }
        WorkflowStep::Confidence => {
            require(
                record.confidence_assessment.is_some(),
                Requirement::ConfidenceAssessment,
            );
        }
        WorkflowStep::Decision => {
            require(record.decision.is_some(), Requirement::DecisionPath);
            require(
                !is_blank(&record.decision_rationale),
                Requirement::DecisionRationale,
            );
            let actions = record
                .next_actions
                .iter()
                .filter(|action| !is_blank(action))
                .count();
            require(actions >= MIN_NEXT_ACTIONS, Requirement::NextActions);
        }
        WorkflowStep::Evidence => {
            require(
                !record.contradictory_evidence.is_empty(),
                Requirement::ContradictoryEvidence,
            );
        }
        WorkflowStep::MixedMethods => {
            let functional = record
                .jobs_to_be_done
                .as_ref()
                .is_some_and(|jobs| !is_blank(&jobs.functional));
            require(functional, Requirement::FunctionalJob);
            require(!record.pain_points.is_empty(), Requirement::PainPoint);
            require(!record.customer_quotes.is_empty(), Requirement::CustomerQuote);
        }
        WorkflowStep::Hypothesis => {
            let cycle = record.hypothesis_tested.as_ref();
            require(
                cycle.is_some_and(|c| !is_blank(&c.hypothesis)),
                Requirement::Hypothesis,
            );
            require(
                cycle.is_some_and(|c| c.outcome.is_some()),
                Requirement::HypothesisOutcome,
            );
        }
        WorkflowStep::Trajectory => {
            require(
                record.trajectory_indicators.all_tagged().is_some(),
                Requirement::TrajectoryIndicators,
            );
        }
        WorkflowStep::PivotTypes => {
            require(record.pivot_readiness.is_some(), Requirement::PivotReadiness);
        }
        WorkflowStep::Complete => {}
    }

    unmet
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
