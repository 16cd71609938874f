//! InstalledRecord entity - what version of a component is on disk
//!
//! The record is the single source of truth for "what version is installed".
//! It changes only on a successful install or a complete upgrade. I/O is
//! handled by the `StateStore` port.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{ContentHash, Style, Version};

/// Normalize a path for state storage (always forward slashes)
pub(crate) fn normalize_state_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse a stored path back into a platform path
pub(crate) fn parse_state_path(s: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(s.replace('/', "\\"))
    } else {
        PathBuf::from(s)
    }
}

/// An artifact owned by an installed component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedArtifact {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Hash of the base snapshot at the installed version
    pub hash: ContentHash,
}

impl TrackedArtifact {
    pub fn new(path: impl Into<PathBuf>, hash: ContentHash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }
}

/// Persisted record of an installed component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledRecord {
    pub component: String,
    pub version: Version,
    pub style: Style,
    /// Output directory the artifacts were generated into
    pub output_dir: PathBuf,
    pub installed_at: DateTime<Utc>,
    pub artifacts: Vec<TrackedArtifact>,
}

impl InstalledRecord {
    pub fn new(
        component: impl Into<String>,
        version: Version,
        style: Style,
        output_dir: impl Into<PathBuf>,
        artifacts: Vec<TrackedArtifact>,
    ) -> Self {
        Self {
            component: component.into(),
            version,
            style,
            output_dir: output_dir.into(),
            installed_at: Utc::now(),
            artifacts,
        }
    }

    pub fn artifact(&self, path: &Path) -> Option<&TrackedArtifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    pub fn state(&self) -> InstallState {
        InstallState::Installed(self.version.clone())
    }
}

/// Lifecycle state of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    NotInstalled,
    Installed(Version),
}

impl InstallState {
    pub fn from_record(record: Option<&InstalledRecord>) -> Self {
        record.map_or(InstallState::NotInstalled, InstalledRecord::state)
    }

    pub fn version(&self) -> Option<&Version> {
        match self {
            InstallState::NotInstalled => None,
            InstallState::Installed(v) => Some(v),
        }
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallState::NotInstalled => f.write_str("not installed"),
            InstallState::Installed(v) => write!(f, "installed ({})", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> InstalledRecord {
        InstalledRecord::new(
            "Button",
            Version::parse("1.0.0").unwrap(),
            Style::Tailwind,
            "src/components",
            vec![TrackedArtifact::new(
                "src/components/Button/Button.tsx",
                ContentHash::from_content("x"),
            )],
        )
    }

    #[test]
    fn state_from_record() {
        assert_eq!(InstallState::from_record(None), InstallState::NotInstalled);
        let record = record();
        let state = InstallState::from_record(Some(&record));
        assert_eq!(state.version().map(|v| v.as_str()), Some("1.0.0"));
        assert_eq!(state.to_string(), "installed (1.0.0)");
    }

    #[test]
    fn finds_tracked_artifact() {
        let record = record();
        assert!(record
            .artifact(Path::new("src/components/Button/Button.tsx"))
            .is_some());
        assert!(record.artifact(Path::new("other.ts")).is_none());
    }

    #[test]
    fn state_paths_use_forward_slashes() {
        let path = PathBuf::from("src").join("Button").join("index.ts");
        assert_eq!(normalize_state_path(&path), "src/Button/index.ts");
        assert_eq!(parse_state_path("src/Button/index.ts"), path);
    }
}
