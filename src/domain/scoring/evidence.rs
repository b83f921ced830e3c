//! Evidence quality - how much weight a piece of evidence deserves.

use crate::domain::decision::Evidence;
use crate::domain::foundation::{FivePointScale, Percentage};

/// Calculator for evidence quality scores.
pub struct EvidenceQualityCalculator;

impl EvidenceQualityCalculator {
    /// Computes `round((credibility + sample_size + recency + directness) / 20 · 100)`.
    ///
    /// Each dimension is 1-5, so the result lies in 20-100.
    pub fn score_dimensions(
        credibility: FivePointScale,
        sample_size: FivePointScale,
        recency: FivePointScale,
        directness: FivePointScale,
    ) -> Percentage {
        let total: u8 = [credibility, sample_size, recency, directness]
            .iter()
            .map(FivePointScale::value)
            .sum();
        // total / 20 * 100 == total * 5, exact for integer totals
        Percentage::new(total * 5)
    }

    /// Scores a single evidence entry.
    pub fn score(evidence: &Evidence) -> Percentage {
        Self::score_dimensions(
            evidence.credibility,
            evidence.sample_size,
            evidence.recency,
            evidence.directness,
        )
    }

    /// Rounded mean quality across a set of evidence.
    ///
    /// Returns `None` when there is no evidence.
    pub fn average(evidence: &[Evidence]) -> Option<Percentage> {
        if evidence.is_empty() {
            return None;
        }
        let count = evidence.len() as u32;
        let total: u32 = evidence.iter().map(|e| u32::from(Self::score(e).value())).sum();
        Some(Percentage::new(((total + count / 2) / count) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EntryId;
    use proptest::prelude::*;

    fn evidence(c: u8, s: u8, r: u8, d: u8) -> Evidence {
        Evidence {
            id: EntryId::new(),
            description: "Enterprise pilots stalled".to_string(),
            source: "sales pipeline".to_string(),
            credibility: FivePointScale::new(c),
            sample_size: FivePointScale::new(s),
            recency: FivePointScale::new(r),
            directness: FivePointScale::new(d),
        }
    }

    #[test]
    fn all_fives_score_one_hundred() {
        assert_eq!(EvidenceQualityCalculator::score(&evidence(5, 5, 5, 5)).value(), 100);
    }

    #[test]
    fn all_ones_score_twenty() {
        assert_eq!(EvidenceQualityCalculator::score(&evidence(1, 1, 1, 1)).value(), 20);
    }

    #[test]
    fn mixed_dimensions_scale_linearly() {
        // (4 + 3 + 2 + 5) / 20 * 100 = 70
        assert_eq!(EvidenceQualityCalculator::score(&evidence(4, 3, 2, 5)).value(), 70);
    }

    #[test]
    fn average_of_empty_set_is_none() {
        assert_eq!(EvidenceQualityCalculator::average(&[]), None);
    }

    #[test]
    fn average_rounds_to_nearest() {
        // 100 and 75 -> 87.5 -> 88
        let set = [evidence(5, 5, 5, 5), evidence(5, 5, 4, 1)];
        assert_eq!(EvidenceQualityCalculator::average(&set).map(|p| p.value()), Some(88));
    }

    proptest! {
        #[test]
        fn score_is_bounded(c in 1u8..=5, s in 1u8..=5, r in 1u8..=5, d in 1u8..=5) {
            let score = EvidenceQualityCalculator::score(&evidence(c, s, r, d)).value();
            prop_assert!((20..=100).contains(&score));
        }
    }
}
