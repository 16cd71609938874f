//! Lifecycle Options
//!
//! Inputs for install, upgrade and diff.

use std::path::PathBuf;

use crate::domain::value_objects::{ComponentName, Style, Version};

/// Default directory generated components are written to
pub const DEFAULT_OUTPUT_DIR: &str = "src/components";

/// Options for `install`
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub component: ComponentName,
    /// Contract version; latest when `None`
    pub version: Option<Version>,
    pub style: Style,
    /// Output directory relative to the project root
    pub output_dir: PathBuf,
    /// Overwrite an existing install
    pub force: bool,
}

impl InstallOptions {
    pub fn new(component: ComponentName) -> Self {
        Self {
            component,
            version: None,
            style: Style::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            force: false,
        }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Options for `upgrade`
#[derive(Debug, Clone)]
pub struct UpgradeOptions {
    /// Target version; latest when `None`
    pub target: Option<Version>,
    /// Run the semantic resolver over merge output
    pub semantic_resolve: bool,
    /// On conflicts, still write merged text (with markers) to disk
    pub write_conflicts: bool,
    /// Merge and report without writing anything
    pub dry_run: bool,
}

impl Default for UpgradeOptions {
    fn default() -> Self {
        Self {
            target: None,
            semantic_resolve: true,
            write_conflicts: true,
            dry_run: false,
        }
    }
}

impl UpgradeOptions {
    pub fn to(mut self, version: Version) -> Self {
        self.target = Some(version);
        self
    }

    pub fn with_semantic_resolve(mut self, enabled: bool) -> Self {
        self.semantic_resolve = enabled;
        self
    }

    pub fn with_write_conflicts(mut self, enabled: bool) -> Self {
        self.write_conflicts = enabled;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Options for `diff`
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Defaults to the installed version
    pub from: Option<Version>,
    /// Defaults to the latest version
    pub to: Option<Version>,
    /// Defaults to the installed style
    pub style: Option<Style>,
    /// Used when the component is not installed
    pub output_dir: PathBuf,
    pub context_lines: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            style: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            context_lines: 3,
        }
    }
}
