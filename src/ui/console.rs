//! Terminal implementation of the `Console` port
//!
//! Messages go to stdout, or to stderr in JSON sessions so stdout carries
//! only events. Prompts use dialoguer when the session is interactive and
//! fall back to their defaults otherwise.

use dialoguer::{Confirm, Input};
use tracing::debug;

use ballast::domain::ports::Console;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::BallastTheme;

pub struct TerminalConsole {
    ui: UiContext,
}

impl TerminalConsole {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn emit(&self, rendered: &str) {
        if self.ui.json {
            eprintln!("{rendered}");
        } else {
            println!("{rendered}");
        }
    }

    fn render_title(&self, text: &str) -> String {
        let underline = "=".repeat(text.chars().count());
        format!(
            "\n{}\n{}\n",
            ColoredText::info(text).bold().render(self.ui.color),
            ColoredText::info(underline).render(self.ui.color)
        )
    }

    fn render_section(&self, text: &str) -> String {
        let underline = "-".repeat(text.chars().count());
        format!(
            "\n{}\n{}",
            ColoredText::plain(text).bold().render(self.ui.color),
            ColoredText::dim(underline).render(self.ui.color)
        )
    }

    fn render_status(&self, icon: Icon, text: ColoredText) -> String {
        format!(
            "{} {}",
            icon.colored(self.ui.color, self.ui.unicode),
            text.render(self.ui.color)
        )
    }

    fn render_listing(&self, items: &[String]) -> String {
        let bullet = Icon::Bullet.colored(self.ui.color, self.ui.unicode);
        items
            .iter()
            .map(|item| format!(" {bullet} {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Console for TerminalConsole {
    fn title(&self, text: &str) {
        self.emit(&self.render_title(text));
    }

    fn section(&self, text: &str) {
        self.emit(&self.render_section(text));
    }

    fn text(&self, text: &str) {
        self.emit(text);
    }

    fn note(&self, text: &str) {
        self.emit(&self.render_status(Icon::Note, ColoredText::dim(text)));
    }

    fn success(&self, text: &str) {
        self.emit(&self.render_status(Icon::Success, ColoredText::success(text)));
    }

    fn warning(&self, text: &str) {
        self.emit(&self.render_status(Icon::Warning, ColoredText::warning(text)));
    }

    fn error(&self, text: &str) {
        eprintln!(
            "{}",
            self.render_status(Icon::Error, ColoredText::error(text))
        );
    }

    fn listing(&self, items: &[String]) {
        if !items.is_empty() {
            self.emit(&self.render_listing(items));
        }
    }

    fn ask(&self, question: &str, default: &str) -> String {
        if !self.ui.interactive {
            debug!(question, default, "non-interactive, using default answer");
            return default.to_string();
        }
        let theme = BallastTheme::new(self.ui.unicode);
        Input::<String>::with_theme(&theme)
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()
            .unwrap_or_else(|err| {
                debug!(error = %err, "prompt failed, using default answer");
                default.to_string()
            })
    }

    fn confirm(&self, question: &str, default: bool) -> bool {
        if !self.ui.interactive {
            debug!(question, default, "non-interactive, using default answer");
            return default;
        }
        let theme = BallastTheme::new(self.ui.unicode);
        Confirm::with_theme(&theme)
            .with_prompt(question)
            .default(default)
            .interact()
            .unwrap_or_else(|err| {
                debug!(error = %err, "prompt failed, using default answer");
                default
            })
    }
}
