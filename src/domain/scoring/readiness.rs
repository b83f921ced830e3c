//! PIVOT readiness - Proof, Insight, Viability, Organization, Timing.

use crate::domain::decision::PivotReadiness;
use crate::domain::foundation::FivePointScale;

/// Calculator for the overall PIVOT readiness rating.
pub struct ReadinessCalculator;

impl ReadinessCalculator {
    /// Rounded mean of the five readiness dimensions, 1-5.
    pub fn overall(readiness: &PivotReadiness) -> FivePointScale {
        let total: u8 = [
            readiness.proof,
            readiness.insight,
            readiness.viability,
            readiness.organization,
            readiness.timing,
        ]
        .iter()
        .map(FivePointScale::value)
        .sum();

        // A mean of five integers never lands on .5, so +2 rounds to nearest
        FivePointScale::new((total + 2) / 5)
    }

    /// Same as [`overall`](Self::overall), for readiness that may not have
    /// been recorded yet.
    pub fn overall_of(readiness: Option<&PivotReadiness>) -> Option<FivePointScale> {
        readiness.map(Self::overall)
    }
}
