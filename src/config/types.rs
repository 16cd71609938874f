//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Style;
use crate::error::ContractorResult;

use super::loader::{self, LoadedConfig};

/// Where contract files live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsConfig {
    #[serde(default = "default_contracts_dir")]
    pub dir: PathBuf,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            dir: default_contracts_dir(),
        }
    }
}

fn default_contracts_dir() -> PathBuf {
    PathBuf::from("contracts")
}

/// Where and how components are generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default)]
    pub style: Style,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            style: Style::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/components")
}

/// Upgrade behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Run the semantic resolver on conflict blocks
    #[serde(default = "default_true")]
    pub semantic_resolve: bool,

    /// Write files containing conflict markers when an upgrade is incomplete
    #[serde(default = "default_true")]
    pub write_conflicts: bool,

    /// Context lines around diff hunks
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            semantic_resolve: true,
            write_conflicts: true,
            context_lines: default_context_lines(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_context_lines() -> usize {
    3
}

/// Terminal presentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Color output mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub const NAMES: &'static [&'static str] = &["auto", "always", "never"];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub const NAMES: &'static [&'static str] = &["quiet", "normal", "verbose", "debug"];

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "quiet" => Some(Self::Quiet),
            "normal" => Some(Self::Normal),
            "verbose" => Some(Self::Verbose),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub contracts: ContractsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub upgrade: UpgradeConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load a single config file, collecting unknown-key warnings
    pub fn load_file(path: &Path) -> ContractorResult<LoadedConfig> {
        loader::load_file(path)
    }

    /// Defaults, then user config, then project `contractor.toml`, then
    /// `CONTRACTOR_*` environment variables
    pub fn load_layered(project_root: &Path) -> ContractorResult<LoadedConfig> {
        loader::load_layered(project_root)
    }

    /// Contracts directory resolved against the project root
    pub fn contracts_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.contracts.dir)
    }
}
