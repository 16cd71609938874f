//! Terminal capability detection

use is_terminal::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// stdout is a terminal
    pub stdout_tty: bool,
    /// stdin is a terminal, so prompts can be answered
    pub stdin_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    /// Whether an interactive confirmation can be shown
    pub fn can_prompt(&self) -> bool {
        self.stdin_tty && self.stdout_tty && !self.is_ci
    }
}

pub fn detect_capabilities() -> TerminalCapabilities {
    detect_with(
        |key| std::env::var(key).ok(),
        std::io::stdout().is_terminal(),
        std::io::stdin().is_terminal(),
        crossterm::terminal::size().ok().map(|(w, _)| w),
    )
}

fn detect_with(
    get_env: impl Fn(&str) -> Option<String>,
    stdout_tty: bool,
    stdin_tty: bool,
    width: Option<u16>,
) -> TerminalCapabilities {
    let term = get_env("TERM").unwrap_or_default();
    let dumb = term.eq_ignore_ascii_case("dumb");

    let is_ci = ["CI", "GITHUB_ACTIONS", "BUILDKITE", "CIRCLECI", "GITLAB_CI"]
        .iter()
        .any(|k| get_env(k).is_some());

    let ascii_locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|k| get_env(k))
        .find(|v| !v.is_empty())
        .map(|v| {
            let v = v.to_lowercase();
            v == "c" || v == "posix"
        })
        .unwrap_or(false);

    TerminalCapabilities {
        stdout_tty,
        stdin_tty,
        supports_color: stdout_tty && !dumb && get_env("NO_COLOR").is_none(),
        supports_unicode: !dumb && !ascii_locale,
        is_ci,
        width: width.unwrap_or(80),
    }
}
