//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `DecisionRecordStore` - Loads and upserts decision records per project

mod decision_record_store;

pub use decision_record_store::{DecisionRecordStore, RecordStoreError};
