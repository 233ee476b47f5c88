use crate::ui::theme::{self, Tone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Bullet,
    Note,
    Deploy,
}

impl Icon {
    pub fn render(self, unicode: bool) -> &'static str {
        let g = theme::glyphs(unicode);
        match self {
            Icon::Success => g.success,
            Icon::Error => g.error,
            Icon::Warning => g.warning,
            Icon::Progress => g.progress,
            Icon::Arrow => g.arrow,
            Icon::Bullet => g.bullet,
            Icon::Note => g.note,
            Icon::Deploy => g.deploy,
        }
    }

    fn tone(self) -> Tone {
        match self {
            Icon::Success => Tone::Success,
            Icon::Error => Tone::Error,
            Icon::Warning | Icon::Progress => Tone::Warning,
            Icon::Arrow | Icon::Bullet => Tone::Dim,
            Icon::Note | Icon::Deploy => Tone::Info,
        }
    }

    pub fn colored(self, color: bool, unicode: bool) -> String {
        self.tone().paint(self.render(unicode), color)
    }
}
