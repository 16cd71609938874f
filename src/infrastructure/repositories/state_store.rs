//! TOML State Store
//!
//! Implements the StateStore port under `<project>/.contractor/`:
//!
//! ```text
//! .contractor/
//!   state.toml                      installed records (format version 1)
//!   state.lock                      advisory lock held while saving
//!   snapshots/<Component>/<version>/<artifact path>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{
    normalize_state_path, parse_state_path, InstalledRecord, TrackedArtifact,
};
use crate::domain::ports::{FsError, StateError, StateResult, StateStore};
use crate::domain::value_objects::{ContentHash, Style, Version};
use crate::infrastructure::fs::atomic_write;

/// Directory holding all contractor state, relative to the project root
pub const STATE_DIR: &str = ".contractor";

/// Current state file format
const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlArtifact {
    path: String,
    hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlRecord {
    version: String,
    style: Style,
    output_dir: String,
    installed_at: DateTime<Utc>,
    #[serde(default)]
    artifacts: Vec<TomlArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlState {
    version: u32,
    #[serde(default)]
    components: BTreeMap<String, TomlRecord>,
}

impl Default for TomlState {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            components: BTreeMap::new(),
        }
    }
}

/// TOML-based state store rooted at a project directory
pub struct TomlStateStore {
    dir: PathBuf,
}

impl TomlStateStore {
    /// Store for the project at `project_root`
    pub fn new(project_root: &Path) -> Self {
        Self {
            dir: project_root.join(STATE_DIR),
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join("state.toml")
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join("state.lock")
    }

    fn snapshot_path(
        &self,
        component: &str,
        version: &Version,
        artifact: &Path,
    ) -> StateResult<PathBuf> {
        let mut path = self.dir.join("snapshots").join(component).join(version.as_str());
        for part in artifact.components() {
            match part {
                Component::Normal(segment) => path.push(segment),
                Component::CurDir => {}
                _ => {
                    return Err(StateError::Io(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!(
                            "artifact path must be relative and stay inside the project: {}",
                            artifact.display()
                        ),
                    )))
                }
            }
        }
        Ok(path)
    }

    fn corrupted(&self, message: impl Into<String>) -> StateError {
        StateError::Corrupted {
            path: self.state_path(),
            message: message.into(),
        }
    }

    fn load(&self) -> StateResult<TomlState> {
        let path = self.state_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(TomlState::default()),
            Err(e) => return Err(e.into()),
        };

        let state: TomlState =
            toml::from_str(&content).map_err(|e| self.corrupted(e.to_string()))?;
        if state.version != FORMAT_VERSION {
            return Err(self.corrupted(format!(
                "unsupported format version {} (expected {})",
                state.version, FORMAT_VERSION
            )));
        }
        Ok(state)
    }

    fn save(&self, state: &TomlState) -> StateResult<()> {
        let content = toml::to_string_pretty(state).map_err(|e| self.corrupted(e.to_string()))?;
        write_file(&self.state_path(), &content)
    }

    fn record_from_toml(&self, component: &str, record: TomlRecord) -> StateResult<InstalledRecord> {
        let version = Version::parse(&record.version)
            .map_err(|e| self.corrupted(format!("{}: {}", component, e)))?;
        Ok(InstalledRecord {
            component: component.to_string(),
            version,
            style: record.style,
            output_dir: parse_state_path(&record.output_dir),
            installed_at: record.installed_at,
            artifacts: record
                .artifacts
                .into_iter()
                .map(|a| TrackedArtifact::new(parse_state_path(&a.path), ContentHash::new(&a.hash)))
                .collect(),
        })
    }
}

fn record_to_toml(record: &InstalledRecord) -> TomlRecord {
    TomlRecord {
        version: record.version.to_string(),
        style: record.style,
        output_dir: normalize_state_path(&record.output_dir),
        installed_at: record.installed_at,
        artifacts: record
            .artifacts
            .iter()
            .map(|a| TomlArtifact {
                path: normalize_state_path(&a.path),
                hash: a.hash.to_string(),
            })
            .collect(),
    }
}

fn write_file(path: &Path, content: &str) -> StateResult<()> {
    atomic_write(path, content.as_bytes()).map_err(|e| match e {
        FsError::Io(err) => StateError::Io(err),
        other => StateError::Io(std::io::Error::other(other.to_string())),
    })
}

impl StateStore for TomlStateStore {
    fn get_record(&self, component: &str) -> StateResult<Option<InstalledRecord>> {
        let mut state = self.load()?;
        state
            .components
            .remove(component)
            .map(|record| self.record_from_toml(component, record))
            .transpose()
    }

    fn list_records(&self) -> StateResult<Vec<InstalledRecord>> {
        self.load()?
            .components
            .into_iter()
            .map(|(component, record)| self.record_from_toml(&component, record))
            .collect()
    }

    fn set_record(&self, record: &InstalledRecord) -> StateResult<()> {
        fs::create_dir_all(&self.dir)?;
        let lock_file = fs::File::create(self.lock_path())?;
        lock_file.lock_exclusive()?;

        let result = self.load().and_then(|mut state| {
            state
                .components
                .insert(record.component.clone(), record_to_toml(record));
            self.save(&state)
        });

        let _ = lock_file.unlock();
        if result.is_ok() {
            debug!(component = %record.component, version = %record.version, "state saved");
        }
        result
    }

    fn get_snapshot(
        &self,
        component: &str,
        version: &Version,
        artifact: &Path,
    ) -> StateResult<Option<String>> {
        let path = self.snapshot_path(component, version, artifact)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_snapshot(
        &self,
        component: &str,
        version: &Version,
        artifact: &Path,
        content: &str,
    ) -> StateResult<()> {
        let path = self.snapshot_path(component, version, artifact)?;
        write_file(&path, content)
    }

    fn has_snapshots(&self, component: &str, version: &Version) -> StateResult<bool> {
        let dir = self
            .dir
            .join("snapshots")
            .join(component)
            .join(version.as_str());
        match fs::read_dir(&dir) {
            Ok(mut entries) => Ok(entries.next().is_some()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn prune_snapshots(&self, component: &str, keep: &Version) -> StateResult<usize> {
        let dir = self.dir.join("snapshots").join(component);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            if entry.file_name() == keep.as_str() {
                continue;
            }
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
            removed += 1;
        }
        if removed > 0 {
            debug!(component, keep = %keep, removed, "pruned snapshots");
        }
        Ok(removed)
    }
}
