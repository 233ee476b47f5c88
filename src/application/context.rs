//! Dependencies shared by every workflow use case

use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::domain::entities::{CommandSpec, TaskSequence};
use crate::domain::ports::{CommandRunner, Console, FileSystem, Pause, TaskExecutor};
use crate::domain::value_objects::ExecutionResult;
use crate::error::{BallastError, BallastResult};

/// Ports and configuration a use case runs against.
///
/// Built once by the command layer; tests assemble one from doubles.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a ProjectConfig,
    pub runner: &'a dyn CommandRunner,
    pub executor: &'a dyn TaskExecutor,
    pub fs: &'a dyn FileSystem,
    pub console: &'a dyn Console,
    pub pause: &'a dyn Pause,
    /// The user's home directory
    pub home: &'a Path,
}

impl<'a> Context<'a> {
    pub fn project_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.config.project_path(relative)
    }

    /// Run one command outside any sequence.
    pub fn exec(&self, spec: &CommandSpec) -> BallastResult<ExecutionResult> {
        Ok(self.runner.run(spec)?.into_result())
    }

    /// Run `sequence` with this context's executor.
    pub fn run(&self, sequence: &TaskSequence) -> BallastResult<ExecutionResult> {
        sequence.run(self.executor)
    }

    /// Run `sequence`; a failed sequence becomes `BallastError::Aborted`.
    pub fn run_or_abort(
        &self,
        sequence: &TaskSequence,
        summary: &str,
    ) -> BallastResult<ExecutionResult> {
        let result = self.run(sequence)?;
        if result.is_success() {
            Ok(result)
        } else {
            Err(BallastError::aborted(summary, result.message()))
        }
    }

    /// Configured value or an empty string.
    pub fn setting(&self, key: &str) -> &'a str {
        let config: &'a ProjectConfig = self.config;
        config.get(key).unwrap_or_default()
    }
}
