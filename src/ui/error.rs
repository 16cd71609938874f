use contractor::ContractorError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Suggested next step for errors a user can act on
fn fix_for(err: &ContractorError) -> Option<String> {
    match err {
        ContractorError::ContractNotFound { component, .. } => Some(format!(
            "Run `contractor versions {}` to list available versions.",
            component
        )),
        ContractorError::UnknownComponent { .. } => {
            Some("Check `[contracts] dir` in contractor.toml or CONTRACTOR_CONTRACTS_DIR.".into())
        }
        ContractorError::MissingBaseSnapshot { component, version, .. } => Some(format!(
            "Run `contractor install {} --version {} --force` to rebuild the snapshots.",
            component, version
        )),
        ContractorError::MissingLocalArtifact { .. } => Some(
            "Restore the file (e.g. from version control) or reinstall the component.".into(),
        ),
        ContractorError::StateCorrupted { .. } => {
            Some("Remove .contractor/ and reinstall the affected components.".into())
        }
        ContractorError::InvalidConfig { .. } => {
            Some("Fix the value or remove the key to use the default.".into())
        }
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(format!("{:#}", err)).render(supports_color)
    );

    if let Some(fix) = err.downcast_ref::<ContractorError>().and_then(fix_for) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            ColoredText::dim(fix).render(supports_color)
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let event = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
            "requires_reinstall": err
                .downcast_ref::<ContractorError>()
                .is_some_and(ContractorError::requires_reinstall),
        });
        let _ = crate::ui::json::emit(event);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_snapshot_suggests_forced_reinstall() {
        let err = anyhow::Error::new(ContractorError::MissingBaseSnapshot {
            component: "Button".into(),
            version: "1.0.0".into(),
            artifact: PathBuf::from("src/components/Button/Button.tsx"),
        });

        let rendered = format_error(&err, false, false);
        assert!(rendered.starts_with("[FAIL] missing base snapshot"));
        assert!(rendered.contains("-> Run `contractor install Button --version 1.0.0 --force`"));
    }

    #[test]
    fn context_is_kept_and_plain_errors_have_no_fix() {
        let err = anyhow::anyhow!("disk full").context("writing Button.tsx");
        let rendered = format_error(&err, false, true);
        assert_eq!(rendered, "✗ writing Button.tsx: disk full\n");
    }
}
