//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Decision record stores (in-memory and filesystem)

pub mod storage;
