//! Deploy Event Port
//!
//! Provides an observable interface for the deploy pipeline.
//! Enables terminal progress, JSON event streams, and test recording.

use crate::domain::value_objects::DeployStage;

/// Event emitted during a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Pipeline accepted a plan
    Started {
        branch: String,
        remote_url: String,
        deploy_branch: String,
        tag: Option<String>,
    },

    /// A stage began
    StageStarted { stage: DeployStage },

    /// Incremental status inside a stage
    Note { stage: DeployStage, message: String },

    /// A stage finished successfully
    StageCompleted { stage: DeployStage },

    /// The push ran; `success` mirrors its result
    Finished { success: bool },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: status lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
