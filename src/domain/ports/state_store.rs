//! StateStore port - persisted installed records and base snapshots
//!
//! The lifecycle use case is the only owner of this state. Merge and diff
//! engines never see it; they receive snapshot text as plain arguments.

use std::path::{Path, PathBuf};

use crate::domain::entities::InstalledRecord;
use crate::domain::value_objects::Version;

/// Result type for state operations
pub type StateResult<T> = Result<T, StateError>;

/// State persistence errors
#[derive(Debug)]
pub enum StateError {
    /// State file exists but cannot be understood
    Corrupted { path: PathBuf, message: String },
    /// I/O error
    Io(std::io::Error),
}

impl From<std::io::Error> for StateError {
    fn from(err: std::io::Error) -> Self {
        StateError::Io(err)
    }
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Corrupted { path, message } => {
                write!(f, "State corrupted at {}: {}", path.display(), message)
            }
            StateError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for StateError {}

/// Record and snapshot persistence
pub trait StateStore {
    /// Installed record for a component, if any
    fn get_record(&self, component: &str) -> StateResult<Option<InstalledRecord>>;

    /// Every installed record, ordered by component name
    fn list_records(&self) -> StateResult<Vec<InstalledRecord>>;

    /// Create or replace the record for `record.component`
    fn set_record(&self, record: &InstalledRecord) -> StateResult<()>;

    /// Exact generated text of an artifact at a version, if recorded
    fn get_snapshot(
        &self,
        component: &str,
        version: &Version,
        artifact: &Path,
    ) -> StateResult<Option<String>>;

    fn put_snapshot(
        &self,
        component: &str,
        version: &Version,
        artifact: &Path,
        content: &str,
    ) -> StateResult<()>;

    /// Whether any snapshot exists for a component version
    fn has_snapshots(&self, component: &str, version: &Version) -> StateResult<bool>;

    /// Remove a component's snapshots for every version except `keep`,
    /// returning how many versions were dropped
    fn prune_snapshots(&self, component: &str, keep: &Version) -> StateResult<usize>;
}
