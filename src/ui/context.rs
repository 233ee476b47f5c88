use ballast::presentation::ColorWhen;

use crate::ui::terminal::TerminalCapabilities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub color: bool,
    pub unicode: bool,
    /// Redraw progress in place
    pub animation: bool,
    /// Prompts may wait for input
    pub interactive: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, assume_yes: bool) -> Self {
        Self::from_caps(json, verbose, cli_color, assume_yes, TerminalCapabilities::detect())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        assume_yes: bool,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => !json && caps.supports_color && !caps.is_ci,
        };

        Self {
            json,
            verbose,
            color,
            unicode: caps.supports_unicode,
            animation: !json && caps.is_tty && !caps.is_ci,
            interactive: !json && !assume_yes && caps.stdin_is_tty,
        }
    }
}
