//! Workflow mode and decision path enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Depth of the guided workflow, chosen once before the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionMode {
    /// Short qualitative path: reflection and confidence self-assessment.
    Easy,
    /// Evidence-driven path with metrics, hypotheses and trajectory.
    Detailed,
}

impl fmt::Display for DecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionMode::Easy => "easy",
            DecisionMode::Detailed => "detailed",
        };
        write!(f, "{}", s)
    }
}

/// The outcome a user commits to at the end of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPath {
    /// Keep going with the current strategy.
    Proceed,
    /// Keep the strategy, fix specific problems.
    Patch,
    /// Change a fundamental part of the strategy.
    Pivot,
}

impl DecisionPath {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionPath::Proceed => "Proceed",
            DecisionPath::Patch => "Patch",
            DecisionPath::Pivot => "Pivot",
        }
    }
}

impl fmt::Display for DecisionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
