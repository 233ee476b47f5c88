//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that writes one JSON object per line
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of a deploy event.
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            branch,
            remote_url,
            deploy_branch,
            tag,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "branch": branch,
            "remote": remote_url,
            "deploy_branch": deploy_branch,
            "tag": tag,
        }),
        DeployEvent::StageStarted { stage } => serde_json::json!({
            "event": "stage_start",
            "command": "deploy",
            "stage": stage.key(),
            "index": stage.number(),
        }),
        DeployEvent::Note { stage, message } => serde_json::json!({
            "event": "note",
            "command": "deploy",
            "stage": stage.key(),
            "message": message,
        }),
        DeployEvent::StageCompleted { stage } => serde_json::json!({
            "event": "stage_complete",
            "command": "deploy",
            "stage": stage.key(),
            "index": stage.number(),
        }),
        DeployEvent::Finished { success } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "success": success,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }
}
