//! Recommendation - proceed / patch / pivot from PMF and trajectory.
//!
//! | PMF    | Trajectory        | Recommendation |
//! |--------|-------------------|----------------|
//! | >= 40  | improving or flat | Proceed        |
//! | >= 40  | declining         | Patch          |
//! | 25-39  | improving or flat | Patch          |
//! | 25-39  | declining         | Pivot          |
//! | < 25   | improving         | Patch          |
//! | < 25   | flat or declining | Pivot          |
//!
//! In the 25-39 band the trajectory decides the outcome.

use serde::Serialize;

use crate::domain::decision::DecisionPath;

use super::{PmfSignal, Trajectory};

/// A suggested path with the reason it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub path: DecisionPath,
    pub pmf_signal: PmfSignal,
    pub trajectory: Trajectory,
    pub rationale: &'static str,
}

/// Applies the recommendation decision table.
pub struct Recommender;

impl Recommender {
    /// Recommends a path, or `None` when either input is unknown.
    pub fn recommend(pmf_score: Option<f64>, trajectory: Trajectory) -> Option<Recommendation> {
        let pmf_signal = PmfSignal::classify(pmf_score);
        let (path, rationale) = match (pmf_signal, trajectory) {
            (PmfSignal::Unknown, _) | (_, Trajectory::Unknown) => return None,

            // Strong fit: only a declining trend warrants fixes. Flat falls
            // through to Proceed.
            (PmfSignal::Strong, Trajectory::Declining) => {
                (DecisionPath::Patch, "Strong fit that is eroding; fix what is slipping")
            }
            (PmfSignal::Strong, _) => {
                (DecisionPath::Proceed, "Strong fit that is holding or growing")
            }

            (PmfSignal::Mixed, Trajectory::Declining) => {
                (DecisionPath::Pivot, "Partial fit that is getting worse")
            }
            (PmfSignal::Mixed, _) => {
                (DecisionPath::Patch, "Partial fit without a downward trend; iterate")
            }

            (PmfSignal::Weak, Trajectory::Improving) => {
                (DecisionPath::Patch, "Weak fit but the leading indicators are improving")
            }
            (PmfSignal::Weak, _) => {
                (DecisionPath::Pivot, "Weak fit with no sign of improvement")
            }
        };

        Some(Recommendation {
            path,
            pmf_signal,
            trajectory,
            rationale,
        })
    }

    /// Convenience wrapper returning only the path.
    pub fn recommended_path(pmf_score: Option<f64>, trajectory: Trajectory) -> Option<DecisionPath> {
        Self::recommend(pmf_score, trajectory).map(|r| r.path)
    }
}
