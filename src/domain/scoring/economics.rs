//! Unit economics - LTV/CAC ratio and its health band.

use serde::{Deserialize, Serialize};

use crate::domain::decision::UnitEconomics;

/// Returns `ltv / cac`, or `None` when either value is missing, CAC is not
/// positive, or the inputs are not finite.
pub fn ltv_cac_ratio(economics: &UnitEconomics) -> Option<f64> {
    let ltv = economics.ltv?;
    let cac = economics.cac?;
    if !ltv.is_finite() || !cac.is_finite() || cac <= 0.0 {
        return None;
    }
    Some(ltv / cac)
}

/// Health band of an LTV/CAC ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicsHealth {
    /// Ratio of 3 or more.
    Healthy,
    /// Ratio between 1 and 3.
    Marginal,
    /// Each customer costs more than they return.
    Unsustainable,
    Unknown,
}

impl EconomicsHealth {
    /// Classifies a ratio computed by [`ltv_cac_ratio`].
    pub fn classify(ratio: Option<f64>) -> Self {
        match ratio {
            Some(r) if r >= 3.0 => EconomicsHealth::Healthy,
            Some(r) if r >= 1.0 => EconomicsHealth::Marginal,
            Some(r) if r.is_finite() => EconomicsHealth::Unsustainable,
            _ => EconomicsHealth::Unknown,
        }
    }
}
