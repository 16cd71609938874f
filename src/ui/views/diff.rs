use contractor::application::{ChangeType, DiffResult, FileDiff};
use contractor::domain::services::{DiffHunk, LineKind};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn change_label(change: ChangeType) -> &'static str {
    match change {
        ChangeType::Added => "added",
        ChangeType::Removed => "removed",
        ChangeType::Modified => "modified",
        ChangeType::Unchanged => "unchanged",
    }
}

pub fn render_hunk(hunk: &DiffHunk, color: bool) -> String {
    let mut out = ColoredText::info(hunk.header()).render(color);
    out.push('\n');
    for line in &hunk.lines {
        let rendered = match line.kind {
            LineKind::Added => ColoredText::success(format!("+{}", line.text)).render(color),
            LineKind::Removed => ColoredText::error(format!("-{}", line.text)).render(color),
            LineKind::Context => format!(" {}", line.text),
        };
        out.push_str(&rendered);
        out.push('\n');
        if line.missing_newline {
            out.push_str(&ColoredText::dim("\\ No newline at end of file").render(color));
            out.push('\n');
        }
    }
    out
}

fn render_file(file: &FileDiff, color: bool, unicode: bool) -> String {
    let path = file.path.display().to_string();
    let mut out = match file.change {
        ChangeType::Added => format!("{} ", Icon::Added.colored(color, unicode)),
        ChangeType::Removed => format!("{} ", Icon::Removed.colored(color, unicode)),
        _ => String::new(),
    };
    out.push_str(
        &ColoredText::plain(format!("--- {}\n+++ {}", path, path))
            .bold()
            .render(color),
    );
    out.push_str(&format!(" ({}, {})\n", change_label(file.change), file.stats));
    for hunk in &file.hunks {
        out.push_str(&render_hunk(hunk, color));
    }
    out
}

pub fn render_diff(result: &DiffResult, color: bool, unicode: bool) -> String {
    let mut out = format!(
        "{} {} {} {} {} ({})\n\n",
        Icon::Diff.colored(color, unicode),
        result.component,
        result.from,
        Icon::Arrow.render(unicode),
        result.to,
        result.style
    );

    let changed: Vec<_> = result
        .files
        .iter()
        .filter(|f| f.change != ChangeType::Unchanged)
        .collect();

    if changed.is_empty() {
        out.push_str("No changes between these versions.\n");
        return out;
    }

    for file in &changed {
        out.push_str(&render_file(file, color, unicode));
        out.push('\n');
    }

    out.push_str(&format!(
        "{} file(s) changed, {} unchanged ({})\n",
        changed.len(),
        result.files.len() - changed.len(),
        result.total_stats()
    ));
    out
}

pub fn diff_json(result: &DiffResult) -> serde_json::Value {
    let files: Vec<_> = result
        .files
        .iter()
        .map(|file| {
            serde_json::json!({
                "path": file.path.display().to_string(),
                "change": file.change,
                "additions": file.stats.additions,
                "deletions": file.stats.deletions,
                "hunks": file.hunks.iter().map(|h| h.header()).collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "event": "diff",
        "component": result.component,
        "from": result.from.as_str(),
        "to": result.to.as_str(),
        "style": result.style,
        "files": files,
    })
}
