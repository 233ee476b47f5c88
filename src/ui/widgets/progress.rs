use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{cursor, terminal, QueueableCommand};

use ballast::domain::ports::PollProgress;

use crate::ui::theme;

#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    current: u64,
    width: u16,
    message: String,
    started: Instant,
}

impl ProgressBar {
    pub fn with_message(total: u64, message: impl Into<String>) -> Self {
        Self {
            total,
            current: 0,
            width: 20,
            message: message.into(),
            started: Instant::now(),
        }
    }

    pub fn inc(&mut self, delta: u64) {
        self.current = self.current.saturating_add(delta).min(self.total);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `message ━━━━──── current/total  elapsed`
    pub fn render(&self, unicode: bool) -> String {
        let g = theme::glyphs(unicode);
        let width = usize::from(self.width.max(1));
        let filled = match self.total {
            0 => 0,
            total => (self.current * width as u64 + total / 2) / total,
        } as usize;
        let bar = format!(
            "{}{}",
            g.bar_done.repeat(filled),
            g.bar_todo.repeat(width - filled)
        );
        let counts = format!(
            "{}/{}  {}",
            self.current,
            self.total,
            format_duration_compact(self.elapsed())
        );
        if self.message.is_empty() {
            format!("{bar}  {counts}")
        } else {
            format!("{} {bar}  {counts}", self.message)
        }
    }
}

fn format_duration_compact(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{}s", secs);
    }
    format!("{}m{:02}s", secs / 60, secs % 60)
}

/// Poll progress drawn in place on stderr. Disabled sessions draw nothing.
pub struct TerminalProgress {
    enabled: bool,
    unicode: bool,
    message: String,
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub fn new(enabled: bool, unicode: bool, message: impl Into<String>) -> Self {
        Self {
            enabled,
            unicode,
            message: message.into(),
            bar: None,
        }
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(bar) = &self.bar else { return Ok(()) };
        out.queue(cursor::MoveToColumn(0))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.write_all(bar.render(self.unicode).as_bytes())?;
        out.flush()
    }
}

impl PollProgress for TerminalProgress {
    fn start(&mut self, total: u32) {
        if !self.enabled {
            return;
        }
        self.bar = Some(ProgressBar::with_message(
            u64::from(total),
            self.message.clone(),
        ));
        let _ = self.draw(&mut io::stderr().lock());
    }

    fn advance(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            bar.inc(1);
        }
        let _ = self.draw(&mut io::stderr().lock());
    }

    fn finish(&mut self) {
        if self.bar.take().is_some() {
            let mut err = io::stderr().lock();
            let _ = err.queue(cursor::MoveToColumn(0));
            let _ = err.queue(terminal::Clear(terminal::ClearType::CurrentLine));
            let _ = err.flush();
        }
    }
}
