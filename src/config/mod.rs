//! Configuration module for Contractor
//!
//! Configuration hierarchy, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (`CONTRACTOR_*`)
//! 3. Project config (`contractor.toml`)
//! 4. User config (`<config dir>/contractor/config.toml`)
//! 5. Built-in defaults

mod env_validator;
mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    apply_env_overrides, default_user_config, load_layered_with, LoadedConfig,
    PROJECT_CONFIG_FILE, USER_CONFIG_ENV,
};
pub use types::{
    ColorMode, Config, ContractsConfig, OutputConfig, UiConfig, UpgradeConfig, Verbosity,
};
