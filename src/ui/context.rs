use contractor::config::{ColorMode, Config, Verbosity};

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// How output should be rendered for this invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbosity: Verbosity,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorMode>, config: &Config) -> Self {
        Self::from_caps(json, verbose, cli_color, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorMode>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color.unwrap_or(config.ui.color) {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color,
        };

        // -v on the command line only ever raises the configured level
        let verbosity = match verbose {
            0 => config.ui.verbosity,
            1 => config.ui.verbosity.max(Verbosity::Verbose),
            _ => Verbosity::Debug,
        };

        Self {
            json,
            verbosity,
            caps,
            color: color && !json,
            unicode: caps.supports_unicode,
        }
    }

    pub fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    /// Prompts are only shown to a person at a terminal
    pub fn interactive(&self) -> bool {
        !self.json && self.caps.can_prompt()
    }
}
