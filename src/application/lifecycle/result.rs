//! Lifecycle Results

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::services::{DiffHunk, DiffStats};
use crate::domain::value_objects::{Style, Version};

/// Result of an install
#[derive(Debug, Clone)]
pub struct InstallResult {
    pub component: String,
    pub version: Version,
    pub style: Style,
    /// Artifacts written, in generation order
    pub written: Vec<PathBuf>,
    /// Version replaced by a forced reinstall
    pub replaced: Option<Version>,
    /// Previously tracked artifacts the new install no longer produces
    pub orphaned: Vec<PathBuf>,
}

/// What happened to one artifact during an upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactOutcome {
    /// Local and incoming identical after merge; nothing to write
    Unchanged,
    /// Merged cleanly
    Merged,
    /// Merge conflicts were all settled by the resolver
    Resolved,
    /// Conflict blocks remain
    Conflicted,
    /// New in the target version
    Added,
    /// No longer produced by the target version; left on disk, untracked
    Orphaned,
}

/// Per-artifact upgrade report
#[derive(Debug, Clone)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub outcome: ArtifactOutcome,
    /// Conflict blocks left in the merged text
    pub conflicts: usize,
    /// Blocks settled by the semantic resolver
    pub resolved: usize,
    /// Line changes from the current local file to the merged text
    pub stats: DiffStats,
    /// Merged text was written to disk
    pub written: bool,
}

impl ArtifactReport {
    pub fn has_conflicts(&self) -> bool {
        self.outcome == ArtifactOutcome::Conflicted
    }
}

/// Terminal state of an upgrade attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// Target equals the installed version
    UpToDate,
    /// Everything merged; version and snapshots committed
    Complete,
    /// Conflicts remain; installed version and snapshots untouched
    Incomplete,
    /// Dry run; nothing written
    Preview,
}

/// Result of an upgrade
#[derive(Debug, Clone)]
pub struct UpgradeResult {
    pub component: String,
    pub from: Version,
    pub to: Version,
    pub outcome: UpgradeOutcome,
    pub artifacts: Vec<ArtifactReport>,
}

impl UpgradeResult {
    pub fn up_to_date(component: impl Into<String>, version: Version) -> Self {
        Self {
            component: component.into(),
            from: version.clone(),
            to: version,
            outcome: UpgradeOutcome::UpToDate,
            artifacts: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(
            self.outcome,
            UpgradeOutcome::Complete | UpgradeOutcome::UpToDate
        )
    }

    /// Paths that still carry conflict blocks
    pub fn conflicted(&self) -> Vec<&Path> {
        self.artifacts
            .iter()
            .filter(|a| a.has_conflicts())
            .map(|a| a.path.as_path())
            .collect()
    }

    pub fn has_conflicts(&self) -> bool {
        self.artifacts.iter().any(ArtifactReport::has_conflicts)
    }

    pub fn total_stats(&self) -> DiffStats {
        let mut total = DiffStats::default();
        for artifact in &self.artifacts {
            total += artifact.stats;
        }
        total
    }
}

/// How an artifact differs between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct FileDiff {
    pub path: PathBuf,
    pub change: ChangeType,
    pub hunks: Vec<DiffHunk>,
    pub stats: DiffStats,
}

/// Result of a version-to-version diff
#[derive(Debug, Clone)]
pub struct DiffResult {
    pub component: String,
    pub from: Version,
    pub to: Version,
    pub style: Style,
    pub files: Vec<FileDiff>,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        self.files.iter().any(|f| f.change != ChangeType::Unchanged)
    }

    pub fn total_stats(&self) -> DiffStats {
        let mut total = DiffStats::default();
        for file in &self.files {
            total += file.stats;
        }
        total
    }
}
