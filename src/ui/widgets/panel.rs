//! Framed block of plain text lines
//!
//! Rows are measured by display width, so content must not carry escape
//! codes; only the frame and the title are colored.

use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::{self, Tone};

#[derive(Debug, Clone)]
pub struct Panel {
    title: String,
    rows: Vec<String>,
    tone: Tone,
}

impl Panel {
    pub fn new(title: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
            tone,
        }
    }

    /// Add `text`, one row per line.
    pub fn line(&mut self, text: &str) -> &mut Self {
        self.rows.extend(text.lines().map(str::to_string));
        self
    }

    pub fn gap(&mut self) -> &mut Self {
        self.rows.push(String::new());
        self
    }

    pub fn render(&self, color: bool, unicode: bool) -> String {
        let g = theme::glyphs(unicode);
        let [top_left, top_right, bottom_left, bottom_right] = g.corners;
        let width = std::iter::once(&self.title)
            .chain(&self.rows)
            .map(|row| row.width())
            .max()
            .unwrap_or(0);
        let rule = g.horizontal.repeat(width + 2);
        let side = self.tone.paint(g.vertical, color);

        let mut out = self.tone.paint(&format!("{top_left}{rule}{top_right}"), color);
        out.push('\n');
        let title = ColoredText::plain(self.title.as_str()).bold().render(color);
        let rows = std::iter::once((&self.title, &title)).chain(self.rows.iter().map(|r| (r, r)));
        for (row, shown) in rows {
            let pad = " ".repeat(width - row.width());
            out.push_str(&format!("{side} {shown}{pad} {side}\n"));
        }
        out.push_str(&self.tone.paint(&format!("{bottom_left}{rule}{bottom_right}"), color));
        out.push('\n');
        out
    }
}
