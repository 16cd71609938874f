//! Upgrade Event Port
//!
//! Observable interface for install and upgrade operations.
//! Drives the `--json` event stream and progress output.

use std::path::PathBuf;

/// Event emitted during install/upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeEvent {
    /// Upgrade started
    Started {
        component: String,
        from: String,
        to: String,
        artifact_count: usize,
    },

    /// Three-way merge finished for one artifact
    ArtifactMerged {
        path: PathBuf,
        conflicts: usize,
    },

    /// The semantic resolver settled some conflict blocks
    ArtifactResolved {
        path: PathBuf,
        resolved: usize,
        remaining_conflicts: bool,
    },

    /// Artifact content was written to disk
    ArtifactWritten {
        path: PathBuf,
        has_conflicts: bool,
    },

    /// New version and snapshot set recorded
    Committed {
        component: String,
        version: String,
        artifact_count: usize,
    },

    /// Conflicts remain; installed version left unchanged
    Incomplete {
        component: String,
        version: String,
        conflicted: Vec<PathBuf>,
    },
}

/// Trait for receiving upgrade events
///
/// Implementations:
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait UpgradeEventSink: Send + Sync {
    fn on_event(&self, event: UpgradeEvent);

    /// Whether this sink wants per-artifact events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl UpgradeEventSink for NoopEventSink {
    fn on_event(&self, _event: UpgradeEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
