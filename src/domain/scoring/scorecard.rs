//! Scorecard - every derived value for a decision record in one place.

use serde::Serialize;

use crate::domain::decision::DecisionRecord;
use crate::domain::foundation::{FivePointScale, Percentage};

use super::{
    ltv_cac_ratio, ConfidenceCalculator, EconomicsHealth, EvidenceQualityCalculator, PmfSignal,
    ReadinessCalculator, Recommendation, Recommender, Trajectory,
};

/// Derived scores for a record. Fields are `None` / unknown until the
/// inputs they depend on have been entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub overall_confidence: Option<Percentage>,
    pub evidence_quality: Option<Percentage>,
    pub pivot_readiness: Option<FivePointScale>,
    pub ltv_cac_ratio: Option<f64>,
    pub economics_health: EconomicsHealth,
    pub pmf_signal: PmfSignal,
    pub trajectory: Trajectory,
    pub trajectory_average: Option<f64>,
    pub recommendation: Option<Recommendation>,
}

impl Scorecard {
    /// Computes the scorecard for a record.
    pub fn for_record(record: &DecisionRecord) -> Self {
        let ratio = record.unit_economics.as_ref().and_then(ltv_cac_ratio);
        let trajectory = Trajectory::classify(&record.trajectory_indicators);

        Self {
            overall_confidence: ConfidenceCalculator::overall_of(
                record.confidence_assessment.as_ref(),
            ),
            evidence_quality: EvidenceQualityCalculator::average(&record.contradictory_evidence),
            pivot_readiness: ReadinessCalculator::overall_of(record.pivot_readiness.as_ref()),
            ltv_cac_ratio: ratio,
            economics_health: EconomicsHealth::classify(ratio),
            pmf_signal: PmfSignal::classify(record.pmf_score()),
            trajectory,
            trajectory_average: Trajectory::average(&record.trajectory_indicators),
            recommendation: Recommender::recommend(record.pmf_score(), trajectory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{
        ConfidenceAssessment, DecisionMode, DecisionPath, ProductMarketFit, TrajectoryIndicators,
        TrendDirection, UnitEconomics,
    };
    use crate::domain::foundation::ProjectId;

    #[test]
    fn empty_record_has_unknown_scores() {
        let record = DecisionRecord::new(ProjectId::new(), DecisionMode::Easy);
        let card = Scorecard::for_record(&record);

        assert_eq!(card.overall_confidence, None);
        assert_eq!(card.evidence_quality, None);
        assert_eq!(card.pivot_readiness, None);
        assert_eq!(card.ltv_cac_ratio, None);
        assert_eq!(card.economics_health, EconomicsHealth::Unknown);
        assert_eq!(card.pmf_signal, PmfSignal::Unknown);
        assert_eq!(card.trajectory, Trajectory::Unknown);
        assert_eq!(card.recommendation, None);
    }

    #[test]
    fn populated_record_derives_every_score() {
        let mut record = DecisionRecord::new(ProjectId::new(), DecisionMode::Detailed);
        record.confidence_assessment = Some(ConfidenceAssessment {
            market: Percentage::new(80),
            product: Percentage::new(70),
            team: Percentage::new(60),
            resource: Percentage::new(50),
            timing: Percentage::new(40),
        });
        record.product_market_fit = Some(ProductMarketFit {
            score: Some(45.0),
            sample_size: Some(200),
        });
        record.unit_economics = Some(UnitEconomics {
            ltv: Some(600.0),
            cac: Some(150.0),
            ..Default::default()
        });
        record.trajectory_indicators = TrajectoryIndicators {
            pmf: Some(TrendDirection::Improving),
            retention: Some(TrendDirection::Improving),
            engagement: Some(TrendDirection::Flat),
            sentiment: Some(TrendDirection::Improving),
        };

        let card = Scorecard::for_record(&record);

        assert_eq!(card.overall_confidence, Some(Percentage::new(65)));
        assert_eq!(card.ltv_cac_ratio, Some(4.0));
        assert_eq!(card.economics_health, EconomicsHealth::Healthy);
        assert_eq!(card.pmf_signal, PmfSignal::Strong);
        assert_eq!(card.trajectory, Trajectory::Improving);
        assert_eq!(card.trajectory_average, Some(1.75));
        assert_eq!(card.recommendation.map(|r| r.path), Some(DecisionPath::Proceed));
    }
}
