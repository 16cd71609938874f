//! Install command handler

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use dialoguer::Confirm;

use contractor::application::InstallOptions;
use contractor::domain::ports::StateStore;
use contractor::{ComponentName, Style, Version};

use super::Project;
use crate::ui::theme::ContractorTheme;
use crate::ui::views::install::{install_json, render_install};

pub struct InstallArgs {
    pub component: ComponentName,
    pub version: Option<Version>,
    pub style: Option<Style>,
    pub out: Option<PathBuf>,
    pub force: bool,
    pub yes: bool,
}

pub fn cmd_install(project: &Project, args: InstallArgs) -> Result<ExitCode> {
    let use_case = project.lifecycle("install");

    let mut force = args.force;
    if !force {
        if let Some(existing) = use_case.state().get_record(args.component.as_str())? {
            if args.yes {
                force = true;
            } else if project.ui.interactive() {
                force = Confirm::with_theme(&ContractorTheme::new(project.ui.unicode))
                    .with_prompt(format!(
                        "{} is already installed at {}. Overwrite it, discarding local edits?",
                        existing.component, existing.version
                    ))
                    .default(false)
                    .interact()
                    .context("reading confirmation")?;
                if !force {
                    project.print("Install cancelled.\n");
                    return Ok(ExitCode::SUCCESS);
                }
            }
        }
    }

    let mut options = InstallOptions::new(args.component)
        .with_style(args.style.unwrap_or(project.config.output.style))
        .with_output_dir(args.out.unwrap_or_else(|| project.config.output.dir.clone()))
        .with_force(force);
    if let Some(version) = args.version {
        options = options.with_version(version);
    }

    let result = use_case.install(&options)?;

    if project.ui.json {
        project.emit(install_json(&result))?;
    } else {
        project.print(&render_install(
            &result,
            project.ui.color,
            project.ui.unicode,
            project.ui.verbose(),
        ));
    }
    Ok(ExitCode::SUCCESS)
}
