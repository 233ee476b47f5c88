//! CommandRunner port - runs one external process to completion

use crate::domain::entities::{CommandOutput, CommandSpec};
use crate::error::BallastResult;

/// Spawns the process described by a `CommandSpec` and blocks until it exits.
///
/// A non-zero exit is a normal `Ok(CommandOutput)`. `Err` is reserved for a
/// process that could not be started (`BallastError::ExecutionSetup`).
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> BallastResult<CommandOutput>;
}

/// Whether `program` resolves on `PATH` (`which` exit status).
pub fn is_installed(runner: &dyn CommandRunner, program: &str) -> BallastResult<bool> {
    let spec = CommandSpec::new("which").arg(program).quiet().debug_only();
    Ok(runner.run(&spec)?.success())
}
