//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the decision workflow domain.

mod errors;
mod ids;
mod percentage;
mod scale;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DecisionId, EntryId, ProjectId};
pub use percentage::Percentage;
pub use scale::FivePointScale;
pub use timestamp::Timestamp;
