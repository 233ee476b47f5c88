use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Title line followed by label/value rows with the values aligned.
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    fields: Vec<(&'static str, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((label, value.into()));
        self
    }

    pub fn render(&self, color: bool, unicode: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            self.icon.colored(color, unicode),
            ColoredText::info(self.title.as_str()).bold().render(color)
        );
        let width = self.fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in &self.fields {
            let label = ColoredText::dim(format!("{label:<width$}")).render(color);
            out.push_str(&format!("  {label}  {value}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_line_up_after_the_longest_label() {
        let rendered = CommandHeader::new(Icon::Deploy, "Ballast Deploy")
            .field("Branch", "main")
            .field("Deploy branch", "main-deploy")
            .render(false, false);

        assert_eq!(
            rendered,
            "[DEPLOY] Ballast Deploy\n  Branch         main\n  Deploy branch  main-deploy\n"
        );
    }
}
