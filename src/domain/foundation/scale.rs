//! Five-point rating value object (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A self-assessed rating from 1 (weakest) to 5 (strongest).
///
/// Used for evidence quality dimensions, pain point severity and the
/// PIVOT readiness checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FivePointScale(u8);

impl FivePointScale {
    /// Lowest rating.
    pub const MIN: Self = Self(1);

    /// Highest rating.
    pub const MAX: Self = Self(5);

    /// Creates a rating, clamping into 1..=5.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 5))
    }

    /// Creates a rating, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&value) {
            return Err(ValidationError::out_of_range("rating", 1, 5, value as i32));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for FivePointScale {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TryFrom<u8> for FivePointScale {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<FivePointScale> for u8 {
    fn from(scale: FivePointScale) -> Self {
        scale.0
    }
}

impl fmt::Display for FivePointScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}
