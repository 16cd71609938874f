use crossterm::style::Color;
use dialoguer::theme::Theme;
use std::fmt;

/// Design tokens for the contractor CLI.
///
/// Only 5 semantic colors; icons are sourced from this module so the
/// ASCII fallback stays in sync.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const CONFLICT: &str = "⚡";
    pub const ADDED: &str = "+";
    pub const REMOVED: &str = "−";
    pub const ARROW: &str = "↳";
    pub const INSTALL: &str = "📦";
    pub const UPGRADE: &str = "⬆";
    pub const DIFF: &str = "Δ";
    pub const STATUS: &str = "●";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const CONFLICT: &str = "[CONFLICT]";
    pub const ADDED: &str = "[+]";
    pub const REMOVED: &str = "[-]";
    pub const ARROW: &str = "->";
    pub const INSTALL: &str = "[INSTALL]";
    pub const UPGRADE: &str = "[UPGRADE]";
    pub const DIFF: &str = "[DIFF]";
    pub const STATUS: &str = "[STATUS]";
}

/// Confirmation prompts that lead with the warning icon.
///
/// Wraps `ColorfulTheme` and only changes how confirm prompts are drawn.
pub struct ContractorTheme {
    unicode: bool,
    inner: dialoguer::theme::ColorfulTheme,
}

impl ContractorTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            inner: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    pub fn prompt_icon(&self) -> &'static str {
        if self.unicode {
            icons::WARNING
        } else {
            icons_ascii::WARNING
        }
    }
}

impl Theme for ContractorTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner.format_error(f, err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        write!(f, "{} ", self.prompt_icon())?;
        self.inner.format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        write!(f, "{} ", self.prompt_icon())?;
        self.inner
            .format_confirm_prompt_selection(f, prompt, selection)
    }
}
