//! Overall confidence - weighted blend of the five confidence dimensions.

use crate::domain::decision::ConfidenceAssessment;
use crate::domain::foundation::Percentage;

/// Weights in percent for market, product, team, resource and timing.
pub const CONFIDENCE_WEIGHTS: [u32; 5] = [30, 25, 20, 15, 10];

/// Calculator for the overall confidence score.
pub struct ConfidenceCalculator;

impl ConfidenceCalculator {
    /// Computes `round(0.30·market + 0.25·product + 0.20·team + 0.15·resource + 0.10·timing)`.
    ///
    /// Uses integer arithmetic so halves always round up. Weights sum to 100,
    /// so the result stays within 0-100.
    pub fn overall(assessment: &ConfidenceAssessment) -> Percentage {
        let dimensions = [
            assessment.market,
            assessment.product,
            assessment.team,
            assessment.resource,
            assessment.timing,
        ];
        let weighted: u32 = dimensions
            .iter()
            .zip(CONFIDENCE_WEIGHTS)
            .map(|(dimension, weight)| u32::from(dimension.value()) * weight)
            .sum();

        // weighted <= 100 * 100, so the quotient always fits in u8
        Percentage::new(((weighted + 50) / 100) as u8)
    }

    /// Same as [`overall`](Self::overall), for an assessment that may not
    /// have been recorded yet.
    pub fn overall_of(assessment: Option<&ConfidenceAssessment>) -> Option<Percentage> {
        assessment.map(Self::overall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assessment(m: u8, p: u8, t: u8, r: u8, y: u8) -> ConfidenceAssessment {
        ConfidenceAssessment {
            market: Percentage::new(m),
            product: Percentage::new(p),
            team: Percentage::new(t),
            resource: Percentage::new(r),
            timing: Percentage::new(y),
        }
    }

    #[test]
    fn weights_sum_to_one_hundred() {
        assert_eq!(CONFIDENCE_WEIGHTS.iter().sum::<u32>(), 100);
    }

    #[test]
    fn overall_matches_worked_example() {
        let overall = ConfidenceCalculator::overall(&assessment(80, 70, 60, 50, 40));
        assert_eq!(overall.value(), 65);
    }

    #[test]
    fn overall_rounds_halves_up() {
        // 0.30*1 + 0.25*1 = 0.55 -> 1
        assert_eq!(ConfidenceCalculator::overall(&assessment(1, 1, 0, 0, 0)).value(), 1);
        // 0.25*2 = 0.5 -> 1
        assert_eq!(ConfidenceCalculator::overall(&assessment(0, 2, 0, 0, 0)).value(), 1);
        // 0.10*4 = 0.4 -> 0
        assert_eq!(ConfidenceCalculator::overall(&assessment(0, 0, 0, 0, 4)).value(), 0);
    }

    #[test]
    fn overall_extremes() {
        assert_eq!(ConfidenceCalculator::overall(&assessment(0, 0, 0, 0, 0)), Percentage::ZERO);
        assert_eq!(
            ConfidenceCalculator::overall(&assessment(100, 100, 100, 100, 100)),
            Percentage::HUNDRED
        );
    }

    #[test]
    fn overall_of_missing_assessment_is_none() {
        assert_eq!(ConfidenceCalculator::overall_of(None), None);
    }

    proptest! {
        #[test]
        fn overall_stays_in_range_and_within_half_point_of_exact(
            m in 0u8..=100, p in 0u8..=100, t in 0u8..=100, r in 0u8..=100, y in 0u8..=100
        ) {
            let overall = ConfidenceCalculator::overall(&assessment(m, p, t, r, y)).value();
            let exact = 0.30 * f64::from(m) + 0.25 * f64::from(p) + 0.20 * f64::from(t)
                + 0.15 * f64::from(r) + 0.10 * f64::from(y);

            prop_assert!(overall <= 100);
            prop_assert!((f64::from(overall) - exact).abs() <= 0.5 + 1e-9);
        }
    }
}
