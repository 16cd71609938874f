//! Lifecycle Use Case
//!
//! The version state machine for installed components:
//!
//! - `install` generates a version, writes it, snapshots it, and records it.
//! - `upgrade` three-way merges every artifact against its base snapshot and
//!   only moves the installed version forward when every artifact merged
//!   without conflicts.
//! - `diff` previews the generated change between two versions.
//!
//! Upgrades run in three phases. Phase 1 reads everything it needs (base
//! snapshots, local files, the incoming generation) and fails before any
//! write. Phase 2 merges in memory. Phase 3 applies the commit rule: the
//! installed record is the last thing written, and nothing at the target
//! version is persisted while conflicts remain.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::domain::entities::{Artifact, ComponentIr, InstalledRecord, TrackedArtifact};
use crate::domain::ports::{
    generator_for, ContractStore, FileSystem, FsError, Generator, NoopEventSink, StateStore,
    UpgradeEvent, UpgradeEventSink,
};
use crate::domain::services::{self, conflict_markers, MergeLabels, ResolverPipeline};
use crate::domain::value_objects::{ComponentName, ContentHash, Style, Version};
use crate::error::{ContractorError, ContractorResult};

use super::options::{DiffOptions, InstallOptions, UpgradeOptions};
use super::result::{
    ArtifactOutcome, ArtifactReport, ChangeType, DiffResult, FileDiff, InstallResult,
    UpgradeOutcome, UpgradeResult,
};

/// Everything phase 1 gathered for one tracked artifact
struct Ancestry {
    base: String,
    local: String,
}

/// Phase 2 output for one artifact
struct PlannedArtifact {
    path: PathBuf,
    /// Freshly generated text at the target version (next base snapshot)
    incoming: String,
    /// Current on-disk content, if any
    local: Option<String>,
    merged: String,
    outcome: ArtifactOutcome,
    conflicts: usize,
    resolved: usize,
}

impl PlannedArtifact {
    fn needs_write(&self) -> bool {
        self.local.as_deref() != Some(self.merged.as_str())
    }

    fn report(&self, written: bool) -> ArtifactReport {
        let hunks = services::diff(self.local.as_deref().unwrap_or(""), &self.merged, 0);
        ArtifactReport {
            path: self.path.clone(),
            outcome: self.outcome,
            conflicts: self.conflicts,
            resolved: self.resolved,
            stats: services::stats(&hunks),
            written,
        }
    }
}

/// Install / upgrade / diff orchestration
///
/// Parameterized by its ports so tests can run it entirely in memory.
pub struct LifecycleUseCase<CS, SS, FS>
where
    CS: ContractStore,
    SS: StateStore,
    FS: FileSystem,
{
    contracts: CS,
    state: SS,
    file_system: FS,
    generators: Vec<Box<dyn Generator>>,
    resolver: ResolverPipeline,
    events: Arc<dyn UpgradeEventSink>,
}

impl<CS, SS, FS> LifecycleUseCase<CS, SS, FS>
where
    CS: ContractStore,
    SS: StateStore,
    FS: FileSystem,
{
    pub fn new(
        contracts: CS,
        state: SS,
        file_system: FS,
        generators: Vec<Box<dyn Generator>>,
    ) -> Self {
        Self {
            contracts,
            state,
            file_system,
            generators,
            resolver: ResolverPipeline::standard(),
            events: Arc::new(NoopEventSink),
        }
    }

    /// Report progress to an event sink
    pub fn with_events(mut self, events: Arc<dyn UpgradeEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Replace the semantic resolver pipeline
    pub fn with_resolver(mut self, resolver: ResolverPipeline) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn state(&self) -> &SS {
        &self.state
    }

    pub fn file_system(&self) -> &FS {
        &self.file_system
    }

    fn emit(&self, event: UpgradeEvent) {
        self.events.on_event(event);
    }

    fn emit_detail(&self, event: UpgradeEvent) {
        if self.events.wants_detailed_events() {
            self.events.on_event(event);
        }
    }

    fn resolve_version(
        &self,
        component: &ComponentName,
        requested: Option<&Version>,
    ) -> ContractorResult<Version> {
        match requested {
            Some(version) => Ok(version.clone()),
            None => self.contracts.latest_version(component),
        }
    }

    /// Generate the artifacts of one component version
    pub fn generate(
        &self,
        component: &ComponentName,
        version: &Version,
        style: Style,
        output_dir: &Path,
    ) -> ContractorResult<Vec<Artifact>> {
        let contract = self.contracts.load_contract(component, version)?;
        let ir = ComponentIr::from_contract(component.clone(), version.clone(), &contract);
        let generator = generator_for(&self.generators, style)
            .ok_or(ContractorError::NoGenerator { style })?;
        let artifacts = generator.generate(&ir, output_dir);
        debug!(
            component = %component,
            version = %version,
            style = %style,
            count = artifacts.len(),
            "generated artifacts"
        );
        Ok(artifacts)
    }

    /// Install a component version, snapshotting every artifact
    pub fn install(&self, options: &InstallOptions) -> ContractorResult<InstallResult> {
        let component = &options.component;
        let _span = info_span!("install", component = %component).entered();

        let existing = self.state.get_record(component.as_str())?;
        if let Some(record) = &existing {
            if !options.force {
                return Err(ContractorError::AlreadyInstalled {
                    component: component.to_string(),
                    version: record.version.to_string(),
                });
            }
        }

        let version = self.resolve_version(component, options.version.as_ref())?;
        let artifacts = self.generate(component, &version, options.style, &options.output_dir)?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            self.file_system.write(artifact.path(), artifact.content())?;
            self.emit_detail(UpgradeEvent::ArtifactWritten {
                path: artifact.path().to_path_buf(),
                has_conflicts: false,
            });
            written.push(artifact.path().to_path_buf());
        }

        for artifact in &artifacts {
            self.state.put_snapshot(
                component.as_str(),
                &version,
                artifact.path(),
                artifact.content(),
            )?;
        }

        let record = InstalledRecord::new(
            component.as_str(),
            version.clone(),
            options.style,
            options.output_dir.clone(),
            artifacts
                .iter()
                .map(|a| TrackedArtifact::new(a.path(), a.hash()))
                .collect(),
        );
        self.state.set_record(&record)?;
        if existing.is_some() {
            self.state.prune_snapshots(component.as_str(), &version)?;
        }

        let orphaned = existing
            .as_ref()
            .map(|old| untracked_by(old, &record))
            .unwrap_or_default();

        info!(version = %version, artifacts = artifacts.len(), "installed");
        self.emit(UpgradeEvent::Committed {
            component: component.to_string(),
            version: version.to_string(),
            artifact_count: artifacts.len(),
        });

        Ok(InstallResult {
            component: component.to_string(),
            version,
            style: options.style,
            written,
            replaced: existing.map(|r| r.version),
            orphaned,
        })
    }

    /// Upgrade an installed component, preserving local edits
    pub fn upgrade(
        &self,
        component: &ComponentName,
        options: &UpgradeOptions,
    ) -> ContractorResult<UpgradeResult> {
        let _span = info_span!("upgrade", component = %component).entered();

        let record = self.state.get_record(component.as_str())?.ok_or_else(|| {
            ContractorError::NotInstalled {
                component: component.to_string(),
            }
        })?;
        let current = record.version.clone();
        let target = self.resolve_version(component, options.target.as_ref())?;

        if target == current {
            info!(version = %current, "already up to date");
            return Ok(UpgradeResult::up_to_date(component.as_str(), current));
        }

        self.emit(UpgradeEvent::Started {
            component: component.to_string(),
            from: current.to_string(),
            to: target.to_string(),
            artifact_count: record.artifacts.len(),
        });

        // Phase 1: gather, no writes
        let incoming = self.generate(component, &target, record.style, &record.output_dir)?;
        let ancestry = self.load_ancestry(component, &record)?;

        // Phase 2: merge in memory
        let planned = self.plan(&record, &target, incoming, ancestry, options)?;
        let orphaned: Vec<PathBuf> = record
            .artifacts
            .iter()
            .filter(|tracked| !planned.iter().any(|p| p.path == tracked.path))
            .map(|tracked| tracked.path.clone())
            .collect();

        let any_conflicts = planned
            .iter()
            .any(|p| p.outcome == ArtifactOutcome::Conflicted);

        let mut result = UpgradeResult {
            component: component.to_string(),
            from: current.clone(),
            to: target.clone(),
            outcome: UpgradeOutcome::Preview,
            artifacts: Vec::new(),
        };

        if options.dry_run {
            result.artifacts = planned.iter().map(|p| p.report(false)).collect();
            result.artifacts.extend(orphaned.into_iter().map(orphan_report));
            return Ok(result);
        }

        // Phase 3: commit rule
        if any_conflicts {
            for plan in &planned {
                let written = options.write_conflicts && plan.needs_write();
                if written {
                    self.write_planned(plan)?;
                }
                result.artifacts.push(plan.report(written));
            }
            result.artifacts.extend(orphaned.into_iter().map(orphan_report));
            result.outcome = UpgradeOutcome::Incomplete;

            let conflicted: Vec<PathBuf> = result
                .conflicted()
                .into_iter()
                .map(Path::to_path_buf)
                .collect();
            warn!(
                conflicted = conflicted.len(),
                "conflicts remain; installed version unchanged"
            );
            self.emit(UpgradeEvent::Incomplete {
                component: component.to_string(),
                version: current.to_string(),
                conflicted,
            });
            return Ok(result);
        }

        for plan in &planned {
            let written = plan.needs_write();
            if written {
                self.write_planned(plan)?;
            }
            result.artifacts.push(plan.report(written));
        }
        for plan in &planned {
            self.state
                .put_snapshot(component.as_str(), &target, &plan.path, &plan.incoming)?;
        }

        let updated = InstalledRecord::new(
            component.as_str(),
            target.clone(),
            record.style,
            record.output_dir.clone(),
            planned
                .iter()
                .map(|p| TrackedArtifact::new(p.path.clone(), ContentHash::from_content(&p.incoming)))
                .collect(),
        );
        self.state.set_record(&updated)?;

        result.artifacts.extend(orphaned.into_iter().map(orphan_report));
        result.outcome = UpgradeOutcome::Complete;

        info!(from = %current, to = %target, "upgrade committed");
        self.emit(UpgradeEvent::Committed {
            component: component.to_string(),
            version: target.to_string(),
            artifact_count: planned.len(),
        });
        Ok(result)
    }

    fn load_ancestry(
        &self,
        component: &ComponentName,
        record: &InstalledRecord,
    ) -> ContractorResult<HashMap<PathBuf, Ancestry>> {
        let mut ancestry = HashMap::with_capacity(record.artifacts.len());
        for tracked in &record.artifacts {
            let base = self
                .state
                .get_snapshot(component.as_str(), &record.version, &tracked.path)?
                .ok_or_else(|| ContractorError::MissingBaseSnapshot {
                    component: component.to_string(),
                    version: record.version.to_string(),
                    artifact: tracked.path.clone(),
                })?;
            let local = match self.file_system.read(&tracked.path) {
                Ok(content) => content,
                Err(FsError::NotFound(_)) => {
                    return Err(ContractorError::MissingLocalArtifact {
                        path: tracked.path.clone(),
                    })
                }
                Err(err) => return Err(err.into()),
            };
            ancestry.insert(tracked.path.clone(), Ancestry { base, local });
        }
        Ok(ancestry)
    }

    fn plan(
        &self,
        record: &InstalledRecord,
        target: &Version,
        incoming: Vec<Artifact>,
        mut ancestry: HashMap<PathBuf, Ancestry>,
        options: &UpgradeOptions,
    ) -> ContractorResult<Vec<PlannedArtifact>> {
        let labels = MergeLabels::new("LOCAL", format!("INCOMING {}", target));
        let mut planned = Vec::with_capacity(incoming.len());

        for artifact in incoming {
            let path = artifact.path().to_path_buf();
            let incoming_text = artifact.into_content();

            let (base, local) = match ancestry.remove(&path) {
                Some(Ancestry { base, local }) => (Some(base), Some(local)),
                None if self.file_system.exists(&path) => {
                    // Untracked file already sitting where a new artifact goes
                    (Some(String::new()), Some(self.file_system.read(&path)?))
                }
                None => (None, None),
            };

            let plan = match (base, local) {
                (Some(base), Some(local)) => {
                    let tracked = record.artifact(&path).is_some();
                    self.merge_one(path, &base, local, incoming_text, tracked, &labels, options)?
                }
                _ => PlannedArtifact {
                    path,
                    merged: incoming_text.clone(),
                    incoming: incoming_text,
                    local: None,
                    outcome: ArtifactOutcome::Added,
                    conflicts: 0,
                    resolved: 0,
                },
            };
            planned.push(plan);
        }

        Ok(planned)
    }

    #[allow(clippy::too_many_arguments)]
    fn merge_one(
        &self,
        path: PathBuf,
        base: &str,
        local: String,
        incoming: String,
        tracked: bool,
        labels: &MergeLabels,
        options: &UpgradeOptions,
    ) -> ContractorResult<PlannedArtifact> {
        let merged = services::merge_with_labels(base, &local, &incoming, labels)?;
        self.emit_detail(UpgradeEvent::ArtifactMerged {
            path: path.clone(),
            conflicts: merged.conflicts,
        });
        debug!(path = %path.display(), conflicts = merged.conflicts, "merged");

        let mut text = merged.text;
        let mut conflicts = merged.conflicts;
        let mut resolved = 0;

        if merged.has_conflicts && options.semantic_resolve {
            let outcome = self.resolver.resolve(&text);
            if outcome.changed {
                resolved = outcome.resolved;
                conflicts = conflicts.saturating_sub(outcome.resolved);
                text = outcome.text;
                self.emit_detail(UpgradeEvent::ArtifactResolved {
                    path: path.clone(),
                    resolved,
                    remaining_conflicts: outcome.still_has_conflicts,
                });
            }
            if !outcome.still_has_conflicts {
                conflicts = 0;
            }
        }

        // Markers left over from an earlier attempt block the commit too
        if conflicts == 0 && conflict_markers::has_conflict_markers(&text) {
            conflicts = conflict_markers::count_conflicts(&text).max(1);
        }

        let outcome = if conflicts > 0 {
            ArtifactOutcome::Conflicted
        } else if resolved > 0 {
            ArtifactOutcome::Resolved
        } else if !tracked {
            ArtifactOutcome::Added
        } else if text == local {
            ArtifactOutcome::Unchanged
        } else {
            ArtifactOutcome::Merged
        };

        Ok(PlannedArtifact {
            path,
            incoming,
            local: Some(local),
            merged: text,
            outcome,
            conflicts,
            resolved,
        })
    }

    fn write_planned(&self, plan: &PlannedArtifact) -> ContractorResult<()> {
        self.file_system.write(&plan.path, &plan.merged)?;
        self.emit_detail(UpgradeEvent::ArtifactWritten {
            path: plan.path.clone(),
            has_conflicts: plan.outcome == ArtifactOutcome::Conflicted,
        });
        Ok(())
    }

    /// Preview the generated change between two versions. Read-only.
    pub fn diff(
        &self,
        component: &ComponentName,
        options: &DiffOptions,
    ) -> ContractorResult<DiffResult> {
        let record = self.state.get_record(component.as_str())?;

        let from = match (&options.from, &record) {
            (Some(v), _) => v.clone(),
            (None, Some(r)) => r.version.clone(),
            (None, None) => {
                return Err(ContractorError::NotInstalled {
                    component: component.to_string(),
                })
            }
        };
        let to = self.resolve_version(component, options.to.as_ref())?;
        let style = options
            .style
            .or_else(|| record.as_ref().map(|r| r.style))
            .unwrap_or_default();
        let output_dir = record
            .as_ref()
            .map(|r| r.output_dir.clone())
            .unwrap_or_else(|| options.output_dir.clone());

        let old = self.generate(component, &from, style, &output_dir)?;
        let new = self.generate(component, &to, style, &output_dir)?;

        let mut files = Vec::with_capacity(new.len());
        for artifact in &new {
            let previous = old.iter().find(|a| a.path() == artifact.path());
            let hunks = services::diff(
                previous.map_or("", |a| a.content()),
                artifact.content(),
                options.context_lines,
            );
            let change = match previous {
                None => ChangeType::Added,
                Some(_) if hunks.is_empty() => ChangeType::Unchanged,
                Some(_) => ChangeType::Modified,
            };
            files.push(FileDiff {
                path: artifact.path().to_path_buf(),
                change,
                stats: services::stats(&hunks),
                hunks,
            });
        }

        for removed in old
            .iter()
            .filter(|a| !new.iter().any(|n| n.path() == a.path()))
        {
            let hunks = services::diff(removed.content(), "", options.context_lines);
            files.push(FileDiff {
                path: removed.path().to_path_buf(),
                change: ChangeType::Removed,
                stats: services::stats(&hunks),
                hunks,
            });
        }

        Ok(DiffResult {
            component: component.to_string(),
            from,
            to,
            style,
            files,
        })
    }
}

fn orphan_report(path: PathBuf) -> ArtifactReport {
    ArtifactReport {
        path,
        outcome: ArtifactOutcome::Orphaned,
        conflicts: 0,
        resolved: 0,
        stats: Default::default(),
        written: false,
    }
}

/// Paths tracked by `old` that `new` no longer tracks
fn untracked_by(old: &InstalledRecord, new: &InstalledRecord) -> Vec<PathBuf> {
    old.artifacts
        .iter()
        .filter(|a| new.artifact(&a.path).is_none())
        .map(|a| a.path.clone())
        .collect()
}
