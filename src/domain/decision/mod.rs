//! Decision module - The decision record and its input groups.
//!
//! A decision record captures everything a user enters while working
//! through the proceed / patch / pivot workflow.

mod assessment;
mod entries;
mod inputs;
mod mode;
mod record;

pub use assessment::{
    CognitiveBias, ConfidenceAssessment, HypothesisCycle, HypothesisOutcome, PivotReadiness,
    PivotType, TrajectoryIndicators, TrendDirection,
};
pub use entries::{
    with_added, with_updated, without, Evidence, EvidencePatch, KeyedEntry, PainPoint,
    PainPointPatch, Quote, QuotePatch, Sentiment,
};
pub use inputs::{
    JobsToBeDone, ProductMarketFit, ProductMarketFitPatch, ReframingResponses,
    ReframingResponsesPatch, RetentionMetrics, RetentionMetricsPatch, UnitEconomics,
    UnitEconomicsPatch,
};
pub use mode::{DecisionMode, DecisionPath};
pub use record::{DecisionRecord, DecisionUpdate, ReflectionUpdate};
