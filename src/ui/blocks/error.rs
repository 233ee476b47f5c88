use crate::ui::theme::Tone;
use crate::ui::widgets::panel::Panel;

/// A failure as shown to the user: headline, underlying causes, and a hint.
#[derive(Debug, Clone, Default)]
pub struct ErrorBlock {
    headline: String,
    causes: Vec<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            ..Self::default()
        }
    }

    /// Add a cause unless the headline already says it.
    pub fn caused_by(mut self, cause: impl Into<String>) -> Self {
        let cause = cause.into();
        if !cause.is_empty() && !self.headline.contains(&cause) {
            self.causes.push(cause);
        }
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, color: bool, unicode: bool) -> String {
        let mut panel = Panel::new("ERROR", Tone::Error);
        panel.gap().line(&self.headline);
        for cause in &self.causes {
            panel.line(&format!("caused by: {cause}"));
        }
        if let Some(fix) = &self.fix {
            panel.gap().line(&format!("FIX: {fix}"));
        }
        panel.render(color, unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headline_causes_and_fix() {
        let rendered = ErrorBlock::new("deployment stage 'commit' failed")
            .caused_by("Git commit failed.")
            .with_fix("Check `git status` in the build checkout.")
            .render(false, false);

        insta::assert_snapshot!(rendered, @r"
        +------------------------------------------------+
        | ERROR                                          |
        |                                                |
        | deployment stage 'commit' failed               |
        | caused by: Git commit failed.                  |
        |                                                |
        | FIX: Check `git status` in the build checkout. |
        +------------------------------------------------+
        ");
    }

    #[test]
    fn causes_repeated_in_the_headline_are_dropped() {
        let block = ErrorBlock::new("failed to start `drush`: No such file or directory")
            .caused_by("No such file or directory");
        assert!(block.causes.is_empty());
    }

    #[test]
    fn multiline_headlines_keep_every_line() {
        let rendered = ErrorBlock::new("Unable to sanitize the build.\nrm: permission denied")
            .render(false, true);
        assert!(rendered.contains("rm: permission denied"));
    }
}
