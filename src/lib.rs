//! Pivot Compass - Guided proceed / patch / pivot decision workflow.
//!
//! This crate implements the decision workflow engine: a dual-mode step
//! navigator, a pure scoring engine over user-entered metrics, an in-memory
//! decision store and a debounced synchronizer that keeps the store in line
//! with a remote decision record store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
