//! Self-assessment inputs: confidence, PIVOT readiness, pivot catalogue,
//! hypothesis cycle, trajectory indicators and cognitive biases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{FivePointScale, Percentage};

/// Confidence in each dimension of the venture, 0 to 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub market: Percentage,
    pub product: Percentage,
    pub team: Percentage,
    pub resource: Percentage,
    pub timing: Percentage,
}

/// The PIVOT readiness checklist, each dimension rated 1 to 5.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotReadiness {
    pub proof: FivePointScale,
    pub insight: FivePointScale,
    pub viability: FivePointScale,
    pub organization: FivePointScale,
    pub timing: FivePointScale,
}

/// Catalogue of strategic pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotType {
    ZoomIn,
    ZoomOut,
    CustomerSegment,
    CustomerNeed,
    Platform,
    BusinessArchitecture,
    ValueCapture,
    EngineOfGrowth,
    Channel,
    Technology,
}

impl PivotType {
    /// All pivot types in catalogue order.
    pub const ALL: [PivotType; 10] = [
        PivotType::ZoomIn,
        PivotType::ZoomOut,
        PivotType::CustomerSegment,
        PivotType::CustomerNeed,
        PivotType::Platform,
        PivotType::BusinessArchitecture,
        PivotType::ValueCapture,
        PivotType::EngineOfGrowth,
        PivotType::Channel,
        PivotType::Technology,
    ];

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            PivotType::ZoomIn => "Zoom-in",
            PivotType::ZoomOut => "Zoom-out",
            PivotType::CustomerSegment => "Customer segment",
            PivotType::CustomerNeed => "Customer need",
            PivotType::Platform => "Platform",
            PivotType::BusinessArchitecture => "Business architecture",
            PivotType::ValueCapture => "Value capture",
            PivotType::EngineOfGrowth => "Engine of growth",
            PivotType::Channel => "Channel",
            PivotType::Technology => "Technology",
        }
    }
}

impl fmt::Display for PivotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of running a hypothesis experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HypothesisOutcome {
    Validated,
    Invalidated,
    Inconclusive,
}

/// The most recent build-measure-learn cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypothesisCycle {
    pub hypothesis: String,
    pub experiment: String,
    pub success_metric: String,
    pub result: String,
    pub outcome: Option<HypothesisOutcome>,
}

/// User-tagged direction of a leading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Flat,
    Declining,
}

impl TrendDirection {
    /// Points contributed to the trajectory average.
    pub fn points(&self) -> u8 {
        match self {
            TrendDirection::Improving => 2,
            TrendDirection::Flat => 1,
            TrendDirection::Declining => 0,
        }
    }
}

/// The four leading indicators tagged in the trajectory step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryIndicators {
    pub pmf: Option<TrendDirection>,
    pub retention: Option<TrendDirection>,
    pub engagement: Option<TrendDirection>,
    pub sentiment: Option<TrendDirection>,
}

impl TrajectoryIndicators {
    /// Returns all four tags, or `None` if any is missing.
    pub fn all_tagged(&self) -> Option<[TrendDirection; 4]> {
        Some([self.pmf?, self.retention?, self.engagement?, self.sentiment?])
    }

    /// Merges the tags present in `patch` over this value.
    pub fn merged_with(&self, patch: &TrajectoryIndicators) -> TrajectoryIndicators {
        TrajectoryIndicators {
            pmf: patch.pmf.or(self.pmf),
            retention: patch.retention.or(self.retention),
            engagement: patch.engagement.or(self.engagement),
            sentiment: patch.sentiment.or(self.sentiment),
        }
    }
}

/// Cognitive biases a user can flag in the reflection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveBias {
    Confirmation,
    SunkCost,
    Overconfidence,
    Anchoring,
    StatusQuo,
    Optimism,
    LossAversion,
    EscalationOfCommitment,
    Survivorship,
    Availability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_catalogue_has_ten_distinct_types() {
        let mut labels: Vec<_> = PivotType::ALL.iter().map(|p| p.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 10);
    }

    #[test]
    fn trend_points_follow_direction() {
        assert_eq!(TrendDirection::Improving.points(), 2);
        assert_eq!(TrendDirection::Flat.points(), 1);
        assert_eq!(TrendDirection::Declining.points(), 0);
    }

    #[test]
    fn all_tagged_requires_every_indicator() {
        let partial = TrajectoryIndicators {
            pmf: Some(TrendDirection::Flat),
            ..Default::default()
        };
        assert!(partial.all_tagged().is_none());

        let full = partial.merged_with(&TrajectoryIndicators {
            retention: Some(TrendDirection::Improving),
            engagement: Some(TrendDirection::Declining),
            sentiment: Some(TrendDirection::Flat),
            pmf: None,
        });
        assert_eq!(
            full.all_tagged(),
            Some([
                TrendDirection::Flat,
                TrendDirection::Improving,
                TrendDirection::Declining,
                TrendDirection::Flat
            ])
        );
    }

    #[test]
    fn pivot_type_serializes_in_snake_case() {
        let json = serde_json::to_string(&PivotType::EngineOfGrowth).unwrap();
        assert_eq!(json, "\"engine_of_growth\"");
    }
}
