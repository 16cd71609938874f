//! Diff command handler

use std::process::ExitCode;

use anyhow::Result;

use contractor::application::DiffOptions;
use contractor::{ComponentName, Style, Version};

use super::Project;
use crate::ui::views::diff::{diff_json, render_diff};

pub fn cmd_diff(
    project: &Project,
    component: &ComponentName,
    from: Option<Version>,
    to: Option<Version>,
    context: Option<usize>,
    style: Option<Style>,
) -> Result<ExitCode> {
    let options = DiffOptions {
        from,
        to,
        style,
        output_dir: project.config.output.dir.clone(),
        context_lines: context.unwrap_or(project.config.upgrade.context_lines),
    };

    let result = project.lifecycle("diff").diff(component, &options)?;

    if project.ui.json {
        project.emit(diff_json(&result))?;
    } else {
        print!(
            "{}",
            render_diff(&result, project.ui.color, project.ui.unicode)
        );
    }
    Ok(ExitCode::SUCCESS)
}
