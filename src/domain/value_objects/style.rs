//! Style value object - selects which generator produces the artifacts

use serde::{Deserialize, Serialize};

/// Output flavor for generated components
///
/// A closed set: each variant maps to exactly one generator in
/// `infrastructure::generators`. New styles are new variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    /// Utility classes inlined as Tailwind class strings
    #[default]
    Tailwind,
    /// Co-located `.module.css` stylesheet
    #[serde(alias = "cssmodules")]
    CssModules,
}

impl Style {
    /// Every supported style
    pub const ALL: [Style; 2] = [Style::Tailwind, Style::CssModules];

    /// Identifier used in config files and the state file
    pub fn id(&self) -> &'static str {
        match self {
            Style::Tailwind => "tailwind",
            Style::CssModules => "css-modules",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Style::Tailwind => "Tailwind",
            Style::CssModules => "CSS Modules",
        }
    }

    /// Parse from a config/env string, accepting a few spellings
    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tailwind" | "tw" => Some(Style::Tailwind),
            "css-modules" | "cssmodules" | "css_modules" => Some(Style::CssModules),
            _ => None,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
