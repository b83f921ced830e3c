//! Transition table for the step navigator.
//!
//! `next_step` is a pure function of the current step, the mode and the
//! guard result, so every edge can be tested without a store or UI.

use crate::domain::decision::DecisionMode;

use super::{GuardFailure, WorkflowStep};

/// Outcome of asking to move forward from a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The guard passed and the workflow moves to the contained step.
    Advanced(WorkflowStep),
    /// The guard failed; the workflow stays where it is.
    Blocked(GuardFailure),
    /// Already at `complete`; nothing follows.
    Terminal,
    /// The step is not part of the mode's sequence.
    NotInSequence {
        step: WorkflowStep,
        mode: DecisionMode,
    },
}

/// Computes the forward transition from `step` in `mode`.
pub fn next_step(
    step: WorkflowStep,
    mode: DecisionMode,
    guard: Result<(), GuardFailure>,
) -> Transition {
    if step.is_terminal() {
        return Transition::Terminal;
    }

    let sequence = WorkflowStep::sequence(mode);
    let Some(position) = step.position_in(mode) else {
        return Transition::NotInSequence { step, mode };
    };

    match guard {
        Err(failure) => Transition::Blocked(failure),
        // Complete is always last, so a non-terminal step has a successor
        Ok(()) => match sequence.get(position + 1) {
            Some(next) => Transition::Advanced(*next),
            None => Transition::Terminal,
        },
    }
}

/// Returns the step before `step` in `mode`, without any guard.
///
/// Returns `None` at the first step, at the terminal step, and for steps
/// outside the mode's sequence.
pub fn previous_step(step: WorkflowStep, mode: DecisionMode) -> Option<WorkflowStep> {
    if step.is_terminal() {
        return None;
    }
    let position = step.position_in(mode)?;
    position
        .checked_sub(1)
        .and_then(|p| WorkflowStep::sequence(mode).get(p).copied())
}
