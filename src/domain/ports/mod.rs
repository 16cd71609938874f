//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod contract_store;
pub mod file_system;
pub mod generator;
pub mod state_store;
pub mod upgrade_events;

pub use contract_store::ContractStore;
pub use file_system::{FileSystem, FsError, FsResult};
pub use generator::{generator_for, Generator};
pub use state_store::{StateError, StateResult, StateStore};
pub use upgrade_events::{NoopEventSink, UpgradeEvent, UpgradeEventSink};
