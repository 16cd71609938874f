//! Command handlers
//!
//! Each handler loads the layered config, wires the concrete adapters into a
//! use case and renders the result for a terminal or as JSON.

mod diff;
mod install;
mod project_root;
mod status;
mod upgrade;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};

use contractor::application::{LifecycleUseCase, StatusUseCase};
use contractor::config::{Config, LoadedConfig};
use contractor::domain::ports::UpgradeEventSink;
use contractor::infrastructure::{
    all_generators, FsContractStore, JsonEventSink, LocalFs, TomlStateStore,
};
use contractor::{ComponentName, Version};

use crate::cli::{Cli, Commands};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Exit code for an upgrade that stopped on conflicts
pub const EXIT_INCOMPLETE: u8 = 2;

type Lifecycle = LifecycleUseCase<FsContractStore, TomlStateStore, LocalFs>;
type Status = StatusUseCase<FsContractStore, TomlStateStore, LocalFs>;

/// Resolved project: root, effective config and output context
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub ui: UiContext,
}

impl Project {
    fn load(cli: &Cli) -> Result<Self> {
        let start = match &cli.project {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("reading current directory")?,
        };
        let root = if cli.project.is_some() {
            start
        } else {
            project_root::discover_project_root(&start)
        };

        let LoadedConfig {
            config,
            warnings,
            env_warnings,
            sources,
        } = Config::load_layered(&root)
            .with_context(|| format!("loading configuration for {}", root.display()))?;
        tracing::debug!(root = %root.display(), sources = ?sources, "project loaded");

        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
        let messages = warnings
            .iter()
            .map(ToString::to_string)
            .chain(env_warnings.into_iter());
        for message in messages {
            tracing::debug!(warning = %message, "config warning");
            if !ui.json && !ui.quiet() {
                eprintln!(
                    "{} {}",
                    Icon::Warning.colored(ui.color, ui.unicode),
                    ColoredText::warning(message).render(ui.color)
                );
            }
        }

        Ok(Self { root, config, ui })
    }

    fn contracts(&self) -> FsContractStore {
        FsContractStore::new(self.config.contracts_dir(&self.root))
    }

    fn state(&self) -> TomlStateStore {
        TomlStateStore::new(&self.root)
    }

    fn fs(&self) -> LocalFs {
        LocalFs::new(&self.root)
    }

    fn lifecycle(&self, command: &'static str) -> Lifecycle {
        let use_case =
            LifecycleUseCase::new(self.contracts(), self.state(), self.fs(), all_generators());
        if self.ui.json {
            let sink: Arc<dyn UpgradeEventSink> = Arc::new(JsonEventSink::stdout(command));
            use_case.with_events(sink)
        } else {
            use_case
        }
    }

    fn status(&self) -> Status {
        StatusUseCase::new(self.contracts(), self.state(), self.fs())
    }

    /// Print human output unless `--json` or quiet
    fn print(&self, text: &str) {
        if !self.ui.json && !self.ui.quiet() {
            print!("{}", text);
        }
    }

    fn emit(&self, event: serde_json::Value) -> Result<()> {
        crate::ui::json::emit(event).context("writing JSON output")
    }
}

fn component(name: &str) -> Result<ComponentName> {
    Ok(ComponentName::new(name)?)
}

fn version(raw: Option<&str>) -> Result<Option<Version>> {
    raw.map(Version::parse).transpose().map_err(Into::into)
}

pub fn run(cli: &Cli) -> Result<ExitCode> {
    let project = Project::load(cli)?;

    match &cli.command {
        Commands::Install {
            component: name,
            version: v,
            style,
            out,
            force,
            yes,
        } => install::cmd_install(
            &project,
            install::InstallArgs {
                component: component(name)?,
                version: version(v.as_deref())?,
                style: *style,
                out: out.clone(),
                force: *force,
                yes: *yes,
            },
        ),
        Commands::Upgrade {
            component: name,
            to,
            no_semantic,
            dry_run,
            no_write_conflicts,
        } => upgrade::cmd_upgrade(
            &project,
            &component(name)?,
            version(to.as_deref())?,
            upgrade::UpgradeFlags {
                no_semantic: *no_semantic,
                dry_run: *dry_run,
                no_write_conflicts: *no_write_conflicts,
            },
        ),
        Commands::Diff {
            component: name,
            from,
            to,
            context,
            style,
        } => diff::cmd_diff(
            &project,
            &component(name)?,
            version(from.as_deref())?,
            version(to.as_deref())?,
            *context,
            *style,
        ),
        Commands::Status { component: name } => {
            let name = name.as_deref().map(component).transpose()?;
            status::cmd_status(&project, name.as_ref())
        }
        Commands::Versions { component: name } => status::cmd_versions(&project, &component(name)?),
    }
}
