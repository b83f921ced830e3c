//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `decision` - The decision record and its nested input groups
//! - `scoring` - Pure scoring functions over decision record fields
//! - `workflow` - Step sequence, transition table and completion guards

pub mod decision;
pub mod foundation;
pub mod scoring;
pub mod workflow;
