//! Status Use Case
//!
//! Read-only reporting: per-artifact state of installed components and the
//! contract versions available for a component.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::InstalledRecord;
use crate::domain::ports::{ContractStore, FileSystem, FsError, StateStore};
use crate::domain::services::conflict_markers;
use crate::domain::value_objects::{ComponentName, ContentHash, Style, Version};
use crate::error::{ContractorError, ContractorResult};

/// State of one tracked artifact on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactState {
    /// Matches the base snapshot
    Clean,
    /// Edited locally
    Modified,
    /// Contains unresolved conflict markers
    Conflicted,
    /// Gone from disk
    Missing,
}

#[derive(Debug, Clone)]
pub struct ArtifactStatus {
    pub path: PathBuf,
    pub state: ArtifactState,
}

#[derive(Debug, Clone)]
pub struct ComponentStatus {
    pub component: String,
    pub version: Version,
    pub style: Style,
    pub output_dir: PathBuf,
    pub installed_at: DateTime<Utc>,
    /// Newest contract version, when newer than the installed one
    pub upgrade_available: Option<Version>,
    pub artifacts: Vec<ArtifactStatus>,
}

impl ComponentStatus {
    pub fn count(&self, state: ArtifactState) -> usize {
        self.artifacts.iter().filter(|a| a.state == state).count()
    }

    pub fn is_clean(&self) -> bool {
        self.artifacts.iter().all(|a| a.state == ArtifactState::Clean)
    }
}

/// Available versions of one component
#[derive(Debug, Clone)]
pub struct VersionsResult {
    pub component: String,
    /// Ascending
    pub versions: Vec<Version>,
    pub installed: Option<Version>,
}

impl VersionsResult {
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }
}

pub struct StatusUseCase<CS, SS, FS>
where
    CS: ContractStore,
    SS: StateStore,
    FS: FileSystem,
{
    contracts: CS,
    state: SS,
    file_system: FS,
}

impl<CS, SS, FS> StatusUseCase<CS, SS, FS>
where
    CS: ContractStore,
    SS: StateStore,
    FS: FileSystem,
{
    pub fn new(contracts: CS, state: SS, file_system: FS) -> Self {
        Self {
            contracts,
            state,
            file_system,
        }
    }

    /// Status of one installed component, or of all of them
    pub fn status(
        &self,
        component: Option<&ComponentName>,
    ) -> ContractorResult<Vec<ComponentStatus>> {
        let records = match component {
            Some(name) => {
                let record = self.state.get_record(name.as_str())?.ok_or_else(|| {
                    ContractorError::NotInstalled {
                        component: name.to_string(),
                    }
                })?;
                vec![record]
            }
            None => self.state.list_records()?,
        };

        records
            .into_iter()
            .map(|record| self.component_status(record))
            .collect()
    }

    fn component_status(&self, record: InstalledRecord) -> ContractorResult<ComponentStatus> {
        let mut artifacts = Vec::with_capacity(record.artifacts.len());
        for tracked in &record.artifacts {
            let state = match self.file_system.read(&tracked.path) {
                Ok(content) if conflict_markers::has_conflict_markers(&content) => {
                    ArtifactState::Conflicted
                }
                Ok(content) if ContentHash::from_content(&content) == tracked.hash => {
                    ArtifactState::Clean
                }
                Ok(_) => ArtifactState::Modified,
                Err(FsError::NotFound(_)) => ArtifactState::Missing,
                Err(err) => return Err(err.into()),
            };
            artifacts.push(ArtifactStatus {
                path: tracked.path.clone(),
                state,
            });
        }

        // A missing contracts directory should not break status
        let upgrade_available = ComponentName::new(&record.component)
            .ok()
            .and_then(|name| self.contracts.latest_version(&name).ok())
            .filter(|latest| latest > &record.version);

        Ok(ComponentStatus {
            component: record.component,
            version: record.version,
            style: record.style,
            output_dir: record.output_dir,
            installed_at: record.installed_at,
            upgrade_available,
            artifacts,
        })
    }

    /// Contract versions for a component, marking the installed one
    pub fn versions(&self, component: &ComponentName) -> ContractorResult<VersionsResult> {
        let versions = self.contracts.list_versions(component)?;
        let installed = self
            .state
            .get_record(component.as_str())?
            .map(|record| record.version);
        Ok(VersionsResult {
            component: component.to_string(),
            versions,
            installed,
        })
    }
}
