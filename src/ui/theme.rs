//! Colors, glyphs and the prompt theme
//!
//! Every glyph the binary draws comes from one of two `Glyphs` tables so a
//! C locale or `TERM=dumb` session never sees a non-ASCII character.

use std::fmt;

use crossterm::style::{Color, Stylize};
use dialoguer::theme::{ColorfulTheme, Theme};

/// The five semantic colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl Tone {
    pub fn color(self) -> Color {
        match self {
            Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Info => Color::Cyan,
            Tone::Dim => Color::DarkGrey,
        }
    }

    /// `text` in this tone, or unchanged when color is off.
    pub fn paint(self, text: &str, color: bool) -> String {
        if color {
            text.with(self.color()).to_string()
        } else {
            text.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub success: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub progress: &'static str,
    pub arrow: &'static str,
    pub bullet: &'static str,
    pub note: &'static str,
    pub deploy: &'static str,
    /// Top-left, top-right, bottom-left, bottom-right
    pub corners: [&'static str; 4],
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub bar_done: &'static str,
    pub bar_todo: &'static str,
}

pub const UNICODE: Glyphs = Glyphs {
    success: "✓",
    error: "✗",
    warning: "⚠",
    progress: "●",
    arrow: "↳",
    bullet: "•",
    note: "ℹ",
    deploy: "📦",
    corners: ["╭", "╮", "╰", "╯"],
    horizontal: "─",
    vertical: "│",
    bar_done: "━",
    bar_todo: "─",
};

pub const ASCII: Glyphs = Glyphs {
    success: "[OK]",
    error: "[FAIL]",
    warning: "[WARN]",
    progress: "[..]",
    arrow: "[>]",
    bullet: "*",
    note: "[NOTE]",
    deploy: "[DEPLOY]",
    corners: ["+", "+", "+", "+"],
    horizontal: "-",
    vertical: "|",
    bar_done: "=",
    bar_todo: "-",
};

pub fn glyphs(unicode: bool) -> &'static Glyphs {
    if unicode {
        &UNICODE
    } else {
        &ASCII
    }
}

/// Dialoguer theme that echoes answered prompts after the success glyph.
pub struct BallastTheme {
    glyphs: &'static Glyphs,
    inner: ColorfulTheme,
}

impl BallastTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            glyphs: glyphs(unicode),
            inner: ColorfulTheme::default(),
        }
    }
}

impl Theme for BallastTheme {
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
        self.inner.format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        let answer = selection.map_or("", |yes| if yes { "yes" } else { "no" });
        write!(f, "{} {} {}", self.glyphs.success, prompt, answer)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        self.inner.format_input_prompt(f, prompt, default)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{} {}: {}", self.glyphs.success, prompt, sel)
    }
}
