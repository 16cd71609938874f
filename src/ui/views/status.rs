use contractor::application::{ArtifactState, ComponentStatus, VersionsResult};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn state_label(state: ArtifactState) -> (Icon, ColoredText) {
    match state {
        ArtifactState::Clean => (Icon::Success, ColoredText::dim("clean")),
        ArtifactState::Modified => (Icon::Warning, ColoredText::info("modified")),
        ArtifactState::Conflicted => (Icon::Conflict, ColoredText::warning("conflicted").bold()),
        ArtifactState::Missing => (Icon::Error, ColoredText::error("missing")),
    }
}

fn render_component(status: &ComponentStatus, color: bool, unicode: bool) -> String {
    let mut out = format!(
        "{} {} {} ({}, {})",
        Icon::Status.colored(color, unicode),
        ColoredText::plain(&status.component).bold().render(color),
        status.version,
        status.style,
        status.output_dir.display()
    );
    if let Some(latest) = &status.upgrade_available {
        out.push_str(&format!(
            " {}",
            ColoredText::info(format!("upgrade available: {}", latest)).render(color)
        ));
    }
    out.push('\n');

    for artifact in &status.artifacts {
        let (icon, label) = state_label(artifact.state);
        out.push_str(&format!(
            "  {} {} {}\n",
            icon.colored(color, unicode),
            artifact.path.display(),
            label.render(color)
        ));
    }
    out
}

pub fn render_status(statuses: &[ComponentStatus], color: bool, unicode: bool) -> String {
    if statuses.is_empty() {
        return "No components installed. Run `contractor install <component>` to add one.\n"
            .to_string();
    }
    statuses
        .iter()
        .map(|s| render_component(s, color, unicode))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status_json(statuses: &[ComponentStatus]) -> serde_json::Value {
    let components: Vec<_> = statuses
        .iter()
        .map(|s| {
            serde_json::json!({
                "component": s.component,
                "version": s.version.as_str(),
                "style": s.style,
                "output_dir": s.output_dir.display().to_string(),
                "installed_at": s.installed_at.to_rfc3339(),
                "upgrade_available": s.upgrade_available.as_ref().map(|v| v.as_str()),
                "clean": s.is_clean(),
                "artifacts": s.artifacts.iter().map(|a| serde_json::json!({
                    "path": a.path.display().to_string(),
                    "state": a.state,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({ "event": "status", "components": components })
}

pub fn render_versions(result: &VersionsResult, color: bool, unicode: bool) -> String {
    if result.versions.is_empty() {
        return format!("No contract versions found for {}.\n", result.component);
    }

    let mut out = format!("{}:\n", result.component);
    for version in result.versions.iter().rev() {
        let installed = result.installed.as_ref() == Some(version);
        let latest = result.latest() == Some(version);
        let mut line = format!("  {}", version);
        if installed {
            line = format!(
                "{} {}",
                line,
                ColoredText::success(format!("{} installed", Icon::Success.render(unicode)))
                    .render(color)
            );
        }
        if latest {
            line.push_str(&format!(" {}", ColoredText::dim("(latest)").render(color)));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn versions_json(result: &VersionsResult) -> serde_json::Value {
    serde_json::json!({
        "event": "versions",
        "component": result.component,
        "versions": result.versions.iter().map(|v| v.as_str()).collect::<Vec<_>>(),
        "installed": result.installed.as_ref().map(|v| v.as_str()),
        "latest": result.latest().map(|v| v.as_str()),
    })
}
