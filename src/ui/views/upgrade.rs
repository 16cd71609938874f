use contractor::application::{ArtifactOutcome, ArtifactReport, UpgradeOutcome, UpgradeResult};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn outcome_line(report: &ArtifactReport, color: bool, unicode: bool) -> String {
    let (icon, label) = match report.outcome {
        ArtifactOutcome::Unchanged => (Icon::Success, ColoredText::dim("unchanged")),
        ArtifactOutcome::Merged => (Icon::Success, ColoredText::success("merged")),
        ArtifactOutcome::Resolved => (
            Icon::Success,
            ColoredText::success(format!("resolved {} conflict(s)", report.resolved)),
        ),
        ArtifactOutcome::Conflicted => (
            Icon::Conflict,
            ColoredText::warning(format!("{} conflict(s)", report.conflicts)).bold(),
        ),
        ArtifactOutcome::Added => (Icon::Added, ColoredText::success("added")),
        ArtifactOutcome::Orphaned => (
            Icon::Warning,
            ColoredText::dim("no longer generated, left untracked"),
        ),
    };

    let mut line = format!(
        "  {} {} {}",
        icon.colored(color, unicode),
        report.path.display(),
        label.render(color)
    );
    if report.stats.has_changes() {
        line.push_str(&format!(" ({})", report.stats));
    }
    line.push('\n');
    line
}

pub fn render_upgrade(result: &UpgradeResult, color: bool, unicode: bool) -> String {
    if result.outcome == UpgradeOutcome::UpToDate {
        return format!(
            "{} {} is already at {}\n",
            Icon::Success.colored(color, unicode),
            result.component,
            result.to
        );
    }

    let mut out = format!(
        "{} {} {} {} {}\n",
        Icon::Upgrade.colored(color, unicode),
        result.component,
        result.from,
        Icon::Arrow.render(unicode),
        result.to
    );
    for report in &result.artifacts {
        out.push_str(&outcome_line(report, color, unicode));
    }
    out.push('\n');

    let summary = match result.outcome {
        UpgradeOutcome::Complete => ColoredText::success(format!(
            "Upgraded {} to {}.",
            result.component, result.to
        )),
        UpgradeOutcome::Preview => ColoredText::info(format!(
            "Dry run: nothing written ({} line changes).",
            result.total_stats()
        )),
        UpgradeOutcome::Incomplete => {
            let written = result.artifacts.iter().any(|a| a.written && a.has_conflicts());
            let hint = if written {
                "Resolve the conflict markers, then run the upgrade again."
            } else {
                "Conflicted files were left untouched."
            };
            ColoredText::warning(format!(
                "Upgrade incomplete: {} file(s) conflicted, {} is still at {}. {}",
                result.conflicted().len(),
                result.component,
                result.from,
                hint
            ))
        }
        UpgradeOutcome::UpToDate => ColoredText::plain(""),
    };
    out.push_str(&summary.render(color));
    out.push('\n');
    out
}

/// Final line for outcomes the event stream does not close itself
pub fn upgrade_json(result: &UpgradeResult) -> serde_json::Value {
    let artifacts: Vec<_> = result
        .artifacts
        .iter()
        .map(|a| {
            serde_json::json!({
                "path": a.path.display().to_string(),
                "outcome": a.outcome,
                "conflicts": a.conflicts,
                "resolved": a.resolved,
                "written": a.written,
            })
        })
        .collect();

    serde_json::json!({
        "event": "upgrade",
        "component": result.component,
        "from": result.from.as_str(),
        "to": result.to.as_str(),
        "outcome": result.outcome,
        "artifacts": artifacts,
    })
}
