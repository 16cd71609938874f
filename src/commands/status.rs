//! Status and versions command handlers

use std::process::ExitCode;

use anyhow::Result;

use contractor::ComponentName;

use super::Project;
use crate::ui::views::status::{render_status, render_versions, status_json, versions_json};

pub fn cmd_status(project: &Project, component: Option<&ComponentName>) -> Result<ExitCode> {
    let statuses = project.status().status(component)?;

    if project.ui.json {
        project.emit(status_json(&statuses))?;
    } else {
        print!(
            "{}",
            render_status(&statuses, project.ui.color, project.ui.unicode)
        );
    }
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_versions(project: &Project, component: &ComponentName) -> Result<ExitCode> {
    let result = project.status().versions(component)?;

    if project.ui.json {
        project.emit(versions_json(&result))?;
    } else {
        print!(
            "{}",
            render_versions(&result, project.ui.color, project.ui.unicode)
        );
    }
    Ok(ExitCode::SUCCESS)
}
