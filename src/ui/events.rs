//! Deploy events rendered as terminal status lines

use ballast::domain::ports::{DeployEvent, DeployEventSink};
use ballast::domain::value_objects::DeployStage;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn render(&self, event: &DeployEvent) -> Option<String> {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        let total = DeployStage::ALL.len();
        match event {
            DeployEvent::Started {
                branch,
                remote_url,
                deploy_branch,
                tag,
            } => {
                let mut header = CommandHeader::new(Icon::Deploy, "Ballast Deploy")
                    .field("Branch", branch.as_str())
                    .field("Remote", remote_url.as_str())
                    .field("Deploy branch", deploy_branch.as_str());
                if let Some(tag) = tag {
                    header = header.field("Tag", tag.as_str());
                }
                Some(header.render(color, unicode))
            }
            DeployEvent::StageStarted { stage } => Some(format!(
                "{} [{}/{}] {}",
                Icon::Progress.colored(color, unicode),
                stage.number(),
                total,
                ColoredText::plain(stage.to_string()).bold().render(color)
            )),
            DeployEvent::Note { message, .. } => Some(format!(
                "  {} {}",
                Icon::Arrow.colored(color, unicode),
                ColoredText::dim(message.as_str()).render(color)
            )),
            DeployEvent::StageCompleted { stage } if self.ui.verbose > 0 => Some(format!(
                "{} {}",
                Icon::Success.colored(color, unicode),
                ColoredText::success(stage.to_string()).render(color)
            )),
            DeployEvent::StageCompleted { .. } | DeployEvent::Finished { .. } => None,
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        if let Some(line) = self.render(&event) {
            println!("{}", line.trim_end_matches('\n'));
        }
    }
}
