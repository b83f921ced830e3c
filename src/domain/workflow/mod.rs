//! Workflow module - Step navigation for the guided decision.
//!
//! The navigator is a finite-state machine over [`WorkflowStep`],
//! parameterized by [`DecisionMode`](crate::domain::decision::DecisionMode).
//! Forward moves are explicit and gated by a per-step completion guard;
//! backward moves are unguarded.
//!
//! ```text
//! shared:    pre-mortem -> progress
//! easy:      progress -> reflection -> confidence -> decision -> complete
//! detailed:  progress -> evidence -> mixed-methods -> hypothesis
//!              -> trajectory -> pivot-types -> decision -> complete
//! ```

mod guards;
mod progress;
mod step;
mod transitions;

pub use guards::{check_guard, GuardFailure, Requirement, MIN_NEXT_ACTIONS, PRE_MORTEM_INSIGHTS};
pub use progress::WorkflowProgress;
pub use step::WorkflowStep;
pub use transitions::{next_step, previous_step, Transition};
