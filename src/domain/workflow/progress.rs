//! WorkflowProgress - where the user stands in the step sequence.

use serde::Serialize;

use crate::domain::decision::DecisionMode;
use crate::domain::foundation::Percentage;

use super::WorkflowStep;

/// A read-only snapshot of progress through a mode's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowProgress {
    pub step: WorkflowStep,
    pub mode: DecisionMode,
    /// 1-based position of the step, or `None` when the step is not visited
    /// in this mode.
    pub position: Option<usize>,
    pub total: usize,
}

impl WorkflowProgress {
    pub fn new(step: WorkflowStep, mode: DecisionMode) -> Self {
        Self {
            step,
            mode,
            position: step.position_in(mode).map(|p| p + 1),
            total: WorkflowStep::sequence(mode).len(),
        }
    }

    /// Number of steps before the current one.
    pub fn completed_count(&self) -> usize {
        self.position.map(|p| p - 1).unwrap_or(0)
    }

    /// Share of non-terminal steps already passed, 0 to 100.
    ///
    /// Reaching `complete` reports 100.
    pub fn percent_complete(&self) -> Percentage {
        let answerable = self.total.saturating_sub(1).max(1);
        let done = self.completed_count().min(answerable);
        Percentage::new(((done * 100) / answerable) as u8)
    }

    /// Returns true once the terminal step is reached.
    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_zero_percent() {
        let progress = WorkflowProgress::new(WorkflowStep::PreMortem, DecisionMode::Easy);
        assert_eq!(progress.position, Some(1));
        assert_eq!(progress.percent_complete(), Percentage::ZERO);
    }

    #[test]
    fn easy_mode_steps_are_evenly_spaced() {
        // five answerable steps in easy mode
        let progress = WorkflowProgress::new(WorkflowStep::Confidence, DecisionMode::Easy);
        assert_eq!(progress.completed_count(), 3);
        assert_eq!(progress.percent_complete().value(), 60);
    }

    #[test]
    fn detailed_mode_uses_integer_division() {
        let progress = WorkflowProgress::new(WorkflowStep::Evidence, DecisionMode::Detailed);
        assert_eq!(progress.total, 9);
        assert_eq!(progress.percent_complete().value(), 25);
    }

    #[test]
    fn complete_step_is_one_hundred_percent() {
        let progress = WorkflowProgress::new(WorkflowStep::Complete, DecisionMode::Detailed);
        assert!(progress.is_complete());
        assert_eq!(progress.percent_complete(), Percentage::HUNDRED);
    }

    #[test]
    fn step_outside_mode_has_no_position() {
        let progress = WorkflowProgress::new(WorkflowStep::Reflection, DecisionMode::Detailed);
        assert_eq!(progress.position, None);
        assert_eq!(progress.percent_complete(), Percentage::ZERO);
    }
}
