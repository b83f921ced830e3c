//! Product-market fit signal strength.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sean Ellis score at or above which the signal is strong.
pub const PMF_STRONG_THRESHOLD: f64 = 40.0;

/// Sean Ellis score at or above which the signal is mixed.
pub const PMF_MIXED_THRESHOLD: f64 = 25.0;

/// Strength of the product-market fit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PmfSignal {
    Strong,
    Mixed,
    Weak,
    Unknown,
}

impl PmfSignal {
    /// Classifies a PMF score: `>= 40` strong, `25..40` mixed, below weak.
    ///
    /// A missing or non-numeric score is unknown.
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            Some(s) if s.is_nan() => PmfSignal::Unknown,
            Some(s) if s >= PMF_STRONG_THRESHOLD => PmfSignal::Strong,
            Some(s) if s >= PMF_MIXED_THRESHOLD => PmfSignal::Mixed,
            Some(_) => PmfSignal::Weak,
            None => PmfSignal::Unknown,
        }
    }
}

impl fmt::Display for PmfSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PmfSignal::Strong => "strong",
            PmfSignal::Mixed => "mixed",
            PmfSignal::Weak => "weak",
            PmfSignal::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
