use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Conflict,
    Added,
    Removed,
    Arrow,
    Install,
    Upgrade,
    Diff,
    Status,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{icons as u, icons_ascii as a};
        let (unicode, ascii) = match self {
            Icon::Success => (u::SUCCESS, a::SUCCESS),
            Icon::Error => (u::ERROR, a::ERROR),
            Icon::Warning => (u::WARNING, a::WARNING),
            Icon::Conflict => (u::CONFLICT, a::CONFLICT),
            Icon::Added => (u::ADDED, a::ADDED),
            Icon::Removed => (u::REMOVED, a::REMOVED),
            Icon::Arrow => (u::ARROW, a::ARROW),
            Icon::Install => (u::INSTALL, a::INSTALL),
            Icon::Upgrade => (u::UPGRADE, a::UPGRADE),
            Icon::Diff => (u::DIFF, a::DIFF),
            Icon::Status => (u::STATUS, a::STATUS),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success | Icon::Added => theme::colors::SUCCESS,
            Icon::Error | Icon::Removed => theme::colors::ERROR,
            Icon::Warning | Icon::Conflict => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Install | Icon::Upgrade | Icon::Diff | Icon::Status => theme::colors::INFO,
        };
        s.with(color).to_string()
    }
}
