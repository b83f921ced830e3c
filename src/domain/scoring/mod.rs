//! Scoring Module - Pure functions deriving scores from decision inputs.
//!
//! Every function here is deterministic and side-effect free. Missing or
//! partial inputs produce an `Unknown` classification or `None` rather than
//! an error.
//!
//! # Components
//!
//! - `ConfidenceCalculator` - Weighted overall confidence (0-100)
//! - `EvidenceQualityCalculator` - Four-dimension evidence quality (20-100)
//! - `ReadinessCalculator` - PIVOT readiness overall (1-5)
//! - `ltv_cac_ratio` / `EconomicsHealth` - Unit economics ratio and health
//! - `PmfSignal` - Product-market fit strength
//! - `Trajectory` - Direction of the four leading indicators
//! - `Recommender` - Proceed / patch / pivot decision table
//! - `Scorecard` - Every derived value for one record

mod confidence;
mod economics;
mod evidence;
mod market_fit;
mod readiness;
mod recommendation;
mod scorecard;
mod trajectory;

pub use confidence::{ConfidenceCalculator, CONFIDENCE_WEIGHTS};
pub use economics::{ltv_cac_ratio, EconomicsHealth};
pub use evidence::EvidenceQualityCalculator;
pub use market_fit::{PmfSignal, PMF_MIXED_THRESHOLD, PMF_STRONG_THRESHOLD};
pub use readiness::ReadinessCalculator;
pub use recommendation::{Recommendation, Recommender};
pub use scorecard::Scorecard;
pub use trajectory::Trajectory;
