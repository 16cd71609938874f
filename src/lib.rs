//! Contractor - contract-driven component generator with merge-safe upgrades
//!
//! Contractor generates UI component source from declarative, versioned
//! contracts and keeps local edits alive across contract upgrades with a
//! native three-way merge, a semantic resolver for token-list conflicts, and
//! a state machine that only commits an upgrade once it is conflict-free.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{LifecycleUseCase, StatusUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::services::{diff, merge, resolve};
pub use domain::value_objects::{ComponentName, Style, Version};
pub use error::{ContractorError, ContractorResult};
