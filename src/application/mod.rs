//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `LifecycleUseCase` - install, upgrade (merge + commit rule), diff
//! - `StatusUseCase` - per-artifact status and available versions

pub mod lifecycle;
pub mod status;

pub use lifecycle::{
    ArtifactOutcome, ArtifactReport, ChangeType, DiffOptions, DiffResult, FileDiff,
    InstallOptions, InstallResult, LifecycleUseCase, UpgradeOptions, UpgradeOutcome,
    UpgradeResult, DEFAULT_OUTPUT_DIR,
};
pub use status::{
    ArtifactState, ArtifactStatus, ComponentStatus, StatusUseCase, VersionsResult,
};
