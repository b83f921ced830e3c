//! Trajectory - overall direction of the four leading indicators.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::decision::TrajectoryIndicators;

/// Overall direction derived from the tagged leading indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Improving,
    Flat,
    Declining,
    Unknown,
}

impl Trajectory {
    /// Mean points across the four indicators (improving 2, flat 1,
    /// declining 0), or `None` if any indicator is untagged.
    pub fn average(indicators: &TrajectoryIndicators) -> Option<f64> {
        Self::total_points(indicators).map(|total| f64::from(total) / 4.0)
    }

    /// Classifies the indicators: average `>= 1.5` improving,
    /// `0.75..1.5` flat, below declining.
    pub fn classify(indicators: &TrajectoryIndicators) -> Self {
        // Compare on the point total to keep the boundaries exact:
        // avg >= 1.5 <=> total >= 6, avg >= 0.75 <=> total >= 3
        match Self::total_points(indicators) {
            Some(total) if total >= 6 => Trajectory::Improving,
            Some(total) if total >= 3 => Trajectory::Flat,
            Some(_) => Trajectory::Declining,
            None => Trajectory::Unknown,
        }
    }

    fn total_points(indicators: &TrajectoryIndicators) -> Option<u8> {
        indicators
            .all_tagged()
            .map(|tags| tags.iter().map(|t| t.points()).sum())
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trajectory::Improving => "improving",
            Trajectory::Flat => "flat",
            Trajectory::Declining => "declining",
            Trajectory::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
