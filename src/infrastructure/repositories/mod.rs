//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod contract_store;
mod state_store;

pub use contract_store::FsContractStore;
pub use state_store::{TomlStateStore, STATE_DIR};
