//! Free-text and quantitative input groups of a decision record.
//!
//! Each group has a matching `*Patch` type. Applying a patch copies only the
//! fields that are `Some`, leaving the rest of the previous value intact.

use serde::{Deserialize, Serialize};

/// Answers to the three reframing prompts of the progress step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReframingResponses {
    /// "If you were starting today, knowing what you know, would you build this?"
    pub starting_over: String,
    /// "What would an outsider with no stake in the venture advise?"
    pub outsider_view: String,
    /// "What would have to be true for the opposite decision to be right?"
    pub opposite_belief: String,
}

impl ReframingResponses {
    /// Returns true when every prompt has a non-blank answer.
    pub fn is_complete(&self) -> bool {
        [&self.starting_over, &self.outsider_view, &self.opposite_belief]
            .iter()
            .all(|answer| !answer.trim().is_empty())
    }
}

/// Partial update for [`ReframingResponses`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReframingResponsesPatch {
    pub starting_over: Option<String>,
    pub outsider_view: Option<String>,
    pub opposite_belief: Option<String>,
}

impl ReframingResponsesPatch {
    pub fn apply_to(self, base: &ReframingResponses) -> ReframingResponses {
        ReframingResponses {
            starting_over: self.starting_over.unwrap_or_else(|| base.starting_over.clone()),
            outsider_view: self.outsider_view.unwrap_or_else(|| base.outsider_view.clone()),
            opposite_belief: self
                .opposite_belief
                .unwrap_or_else(|| base.opposite_belief.clone()),
        }
    }
}

/// Sean Ellis survey result: share of users who would be "very disappointed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMarketFit {
    /// Percentage of respondents, 0 to 100.
    pub score: Option<f64>,
    /// Number of survey respondents.
    pub sample_size: Option<u32>,
}

/// Partial update for [`ProductMarketFit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMarketFitPatch {
    pub score: Option<f64>,
    pub sample_size: Option<u32>,
}

impl ProductMarketFitPatch {
    pub fn apply_to(self, base: Option<&ProductMarketFit>) -> ProductMarketFit {
        let base = base.copied().unwrap_or_default();
        ProductMarketFit {
            score: self.score.or(base.score),
            sample_size: self.sample_size.or(base.sample_size),
        }
    }
}

/// Cohort retention percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionMetrics {
    pub day1: Option<f64>,
    pub day7: Option<f64>,
    pub day30: Option<f64>,
}

/// Partial update for [`RetentionMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionMetricsPatch {
    pub day1: Option<f64>,
    pub day7: Option<f64>,
    pub day30: Option<f64>,
}

impl RetentionMetricsPatch {
    pub fn apply_to(self, base: Option<&RetentionMetrics>) -> RetentionMetrics {
        let base = base.copied().unwrap_or_default();
        RetentionMetrics {
            day1: self.day1.or(base.day1),
            day7: self.day7.or(base.day7),
            day30: self.day30.or(base.day30),
        }
    }
}

/// Per-customer economics and cash position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomics {
    /// Customer lifetime value.
    pub ltv: Option<f64>,
    /// Customer acquisition cost.
    pub cac: Option<f64>,
    pub monthly_burn: Option<f64>,
    pub months_runway: Option<f64>,
}

/// Partial update for [`UnitEconomics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitEconomicsPatch {
    pub ltv: Option<f64>,
    pub cac: Option<f64>,
    pub monthly_burn: Option<f64>,
    pub months_runway: Option<f64>,
}

impl UnitEconomicsPatch {
    pub fn apply_to(self, base: Option<&UnitEconomics>) -> UnitEconomics {
        let base = base.copied().unwrap_or_default();
        UnitEconomics {
            ltv: self.ltv.or(base.ltv),
            cac: self.cac.or(base.cac),
            monthly_burn: self.monthly_burn.or(base.monthly_burn),
            months_runway: self.months_runway.or(base.months_runway),
        }
    }
}

/// The job customers hire the product to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsToBeDone {
    pub functional: String,
    pub emotional: String,
    pub social: String,
}
