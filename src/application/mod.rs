//! Application layer - the workflow session and its collaborators.
//!
//! - `DecisionStore` - holds the active record and applies typed mutations
//! - `PersistenceSynchronizer` - load on open, debounced save on change
//! - `Debouncer` - the cancellable deadline owned by the save loop
//! - `WorkflowSession` - wires the three together with the step navigator

mod debounce;
mod decision_store;
mod session;
mod synchronizer;

pub use debounce::Debouncer;
pub use decision_store::{ChangeOrigin, DecisionStore, StoreSnapshot};
pub use session::WorkflowSession;
pub use synchronizer::{LoadOutcome, PersistenceSynchronizer, SyncStatus, SynchronizerConfig};
