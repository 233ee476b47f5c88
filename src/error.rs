//! Error types for Ballast
//!
//! Library code returns `BallastResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::DeployStage;

/// Result type alias for Ballast operations
pub type BallastResult<T> = Result<T, BallastError>;

/// Main error type for Ballast operations
#[derive(Error, Debug)]
pub enum BallastError {
    /// The process could not be spawned at all.
    ///
    /// Distinct from a command that ran and exited non-zero.
    #[error("failed to start `{command}`: {source}")]
    ExecutionSetup {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A required option or credential is missing
    #[error("{0}")]
    Validation(String),

    /// A user or environment precondition is not met (machine not booted,
    /// software missing). Commands report these and stop without failing.
    #[error("{0}")]
    Precondition(String),

    /// A workflow step failed. Completed steps with a rollback were undone.
    #[error("{0}")]
    Aborted(String),

    /// A deployment stage failed and the pipeline was aborted
    #[error("deployment stage '{stage}' failed: {message}")]
    Stage { stage: DeployStage, message: String },

    /// A full readiness cycle passed without the build ever starting
    #[error("after a full round of monitoring, node modules never began to compile")]
    NeverStarted,

    /// Readiness cycles keep elapsing without the build advancing
    #[error("front-end build stalled: no progress after {cycles} monitoring rounds")]
    Stalled { cycles: u32 },

    /// No project root could be located
    #[error("project root not found from {start} (looked for setup/config.yml or composer.json)")]
    ConfigNotFound { start: PathBuf },

    /// The config file exists but cannot be used
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not well-formed YAML
    #[error("YAML parsing error in {file}: {source}")]
    Yaml {
        file: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

impl BallastError {
    /// Whether the command layer should report this and exit cleanly.
    pub fn is_precondition(&self) -> bool {
        matches!(self, BallastError::Precondition(_))
    }

    /// `summary`, followed by the failing command's output when there is any.
    pub fn aborted(summary: &str, output: &str) -> Self {
        let output = output.trim();
        if output.is_empty() {
            BallastError::Aborted(summary.to_string())
        } else {
            BallastError::Aborted(format!("{summary}\n{output}"))
        }
    }
}
