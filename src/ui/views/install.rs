use contractor::application::InstallResult;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_install(result: &InstallResult, color: bool, unicode: bool, verbose: bool) -> String {
    let mut out = match &result.replaced {
        Some(previous) => format!(
            "{} Reinstalled {} {} {} {} ({})\n",
            Icon::Install.colored(color, unicode),
            result.component,
            previous,
            Icon::Arrow.render(unicode),
            result.version,
            result.style
        ),
        None => format!(
            "{} Installed {} {} ({})\n",
            Icon::Install.colored(color, unicode),
            result.component,
            result.version,
            result.style
        ),
    };

    if verbose {
        for path in &result.written {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Added.colored(color, unicode),
                path.display()
            ));
        }
    } else {
        out.push_str(&format!("  {} file(s) written\n", result.written.len()));
    }

    for path in &result.orphaned {
        out.push_str(&format!(
            "  {} {} {}\n",
            Icon::Warning.colored(color, unicode),
            path.display(),
            ColoredText::dim("is no longer generated and is now untracked").render(color)
        ));
    }
    out
}

pub fn install_json(result: &InstallResult) -> serde_json::Value {
    serde_json::json!({
        "event": "install",
        "component": result.component,
        "version": result.version.as_str(),
        "style": result.style,
        "replaced": result.replaced.as_ref().map(|v| v.as_str()),
        "written": result.written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "orphaned": result.orphaned.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
    })
}
