//! Upgrade command handler

use std::process::ExitCode;

use anyhow::Result;

use contractor::application::{UpgradeOptions, UpgradeOutcome};
use contractor::{ComponentName, Version};

use super::{Project, EXIT_INCOMPLETE};
use crate::ui::views::upgrade::{render_upgrade, upgrade_json};

pub struct UpgradeFlags {
    pub no_semantic: bool,
    pub dry_run: bool,
    pub no_write_conflicts: bool,
}

pub fn cmd_upgrade(
    project: &Project,
    component: &ComponentName,
    target: Option<Version>,
    flags: UpgradeFlags,
) -> Result<ExitCode> {
    let config = &project.config.upgrade;
    let mut options = UpgradeOptions::default()
        .with_semantic_resolve(config.semantic_resolve && !flags.no_semantic)
        .with_write_conflicts(config.write_conflicts && !flags.no_write_conflicts)
        .with_dry_run(flags.dry_run);
    if let Some(version) = target {
        options = options.to(version);
    }

    let result = project.lifecycle("upgrade").upgrade(component, &options)?;

    if project.ui.json {
        // Committed and incomplete upgrades close their own event stream
        if matches!(
            result.outcome,
            UpgradeOutcome::UpToDate | UpgradeOutcome::Preview
        ) {
            project.emit(upgrade_json(&result))?;
        }
    } else if result.outcome == UpgradeOutcome::Incomplete {
        // Conflicts are reported even in quiet mode
        print!(
            "{}",
            render_upgrade(&result, project.ui.color, project.ui.unicode)
        );
    } else {
        project.print(&render_upgrade(
            &result,
            project.ui.color,
            project.ui.unicode,
        ));
    }

    Ok(match result.outcome {
        UpgradeOutcome::Incomplete => ExitCode::from(EXIT_INCOMPLETE),
        _ => ExitCode::SUCCESS,
    })
}
