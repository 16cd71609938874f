//! Lifecycle Module
//!
//! Install, upgrade and diff for generated components.
//!
//! ## Structure
//!
//! - `options` - `InstallOptions`, `UpgradeOptions`, `DiffOptions`
//! - `result` - `InstallResult`, `UpgradeResult`, `DiffResult`
//! - `use_case` - `LifecycleUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use contractor::application::lifecycle::{LifecycleUseCase, UpgradeOptions};
//!
//! let use_case = LifecycleUseCase::new(contracts, state, fs, all_generators());
//! let result = use_case.upgrade(&component, &UpgradeOptions::default())?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DiffOptions, InstallOptions, UpgradeOptions, DEFAULT_OUTPUT_DIR};
pub use result::{
    ArtifactOutcome, ArtifactReport, ChangeType, DiffResult, FileDiff, InstallResult,
    UpgradeOutcome, UpgradeResult,
};
pub use use_case::LifecycleUseCase;
