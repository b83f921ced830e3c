//! WorkflowStep - identifiers of the guided decision steps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::DecisionMode;

/// A step of the guided decision workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStep {
    #[default]
    PreMortem,
    Progress,
    Reflection,
    Confidence,
    Decision,
    Evidence,
    Hypothesis,
    MixedMethods,
    Trajectory,
    PivotTypes,
    Complete,
}

impl WorkflowStep {
    /// Step order for easy mode.
    pub const EASY_SEQUENCE: [WorkflowStep; 6] = [
        WorkflowStep::PreMortem,
        WorkflowStep::Progress,
        WorkflowStep::Reflection,
        WorkflowStep::Confidence,
        WorkflowStep::Decision,
        WorkflowStep::Complete,
    ];

    /// Step order for detailed mode.
    pub const DETAILED_SEQUENCE: [WorkflowStep; 9] = [
        WorkflowStep::PreMortem,
        WorkflowStep::Progress,
        WorkflowStep::Evidence,
        WorkflowStep::MixedMethods,
        WorkflowStep::Hypothesis,
        WorkflowStep::Trajectory,
        WorkflowStep::PivotTypes,
        WorkflowStep::Decision,
        WorkflowStep::Complete,
    ];

    /// The initial step, shared by both modes.
    pub fn first() -> Self {
        WorkflowStep::PreMortem
    }

    /// Returns the ordered steps for a mode.
    pub fn sequence(mode: DecisionMode) -> &'static [WorkflowStep] {
        match mode {
            DecisionMode::Easy => &Self::EASY_SEQUENCE,
            DecisionMode::Detailed => &Self::DETAILED_SEQUENCE,
        }
    }

    /// Returns the 0-based position of this step in the mode's sequence.
    pub fn position_in(&self, mode: DecisionMode) -> Option<usize> {
        Self::sequence(mode).iter().position(|s| s == self)
    }

    /// Returns true if the mode's sequence visits this step.
    pub fn belongs_to(&self, mode: DecisionMode) -> bool {
        self.position_in(mode).is_some()
    }

    /// Returns true for the terminal step.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowStep::Complete)
    }

    /// Returns the stable identifier used in URLs and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::PreMortem => "pre-mortem",
            WorkflowStep::Progress => "progress",
            WorkflowStep::Reflection => "reflection",
            WorkflowStep::Confidence => "confidence",
            WorkflowStep::Decision => "decision",
            WorkflowStep::Evidence => "evidence",
            WorkflowStep::Hypothesis => "hypothesis",
            WorkflowStep::MixedMethods => "mixed-methods",
            WorkflowStep::Trajectory => "trajectory",
            WorkflowStep::PivotTypes => "pivot-types",
            WorkflowStep::Complete => "complete",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sequences_share_the_prefix_and_the_ending() {
        for mode in [DecisionMode::Easy, DecisionMode::Detailed] {
            let seq = WorkflowStep::sequence(mode);
            assert_eq!(&seq[..2], &[WorkflowStep::PreMortem, WorkflowStep::Progress]);
            assert_eq!(seq[seq.len() - 2], WorkflowStep::Decision);
            assert_eq!(seq[seq.len() - 1], WorkflowStep::Complete);
        }
    }

    #[test]
    fn mode_specific_steps_belong_to_one_mode_only() {
        assert!(WorkflowStep::Reflection.belongs_to(DecisionMode::Easy));
        assert!(!WorkflowStep::Reflection.belongs_to(DecisionMode::Detailed));
        assert!(WorkflowStep::Trajectory.belongs_to(DecisionMode::Detailed));
        assert!(!WorkflowStep::Trajectory.belongs_to(DecisionMode::Easy));
    }

    #[test]
    fn as_str_matches_serialized_form() {
        for step in WorkflowStep::DETAILED_SEQUENCE
            .iter()
            .chain(WorkflowStep::EASY_SEQUENCE.iter())
        {
            let json = serde_json::to_string(step).unwrap();
            assert_eq!(json, format!("\"{}\"", step.as_str()));
        }
    }

    #[test]
    fn only_complete_is_terminal() {
        assert!(WorkflowStep::Complete.is_terminal());
        assert!(!WorkflowStep::Decision.is_terminal());
    }
}
