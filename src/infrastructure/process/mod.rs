//! Process runner
//!
//! Runs `CommandSpec`s with `std::process::Command`, capturing output and
//! echoing it when the session verbosity allows.

#[cfg(test)]
pub mod scripted;

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::entities::{CommandOutput, CommandSpec, Invocation};
use crate::domain::ports::CommandRunner;
use crate::domain::value_objects::Verbosity;
use crate::error::{BallastError, BallastResult};

/// Runs commands on the local host.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    verbosity: Verbosity,
    echo: bool,
}

impl ProcessRunner {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            echo: true,
        }
    }

    /// Never echo captured output (machine-readable sessions).
    pub fn silent(mut self) -> Self {
        self.echo = false;
        self
    }

    fn build(spec: &CommandSpec) -> Command {
        let mut cmd = match spec.invocation() {
            Invocation::Program { program, args } => {
                let mut cmd = Command::new(program);
                cmd.args(args);
                cmd
            }
            Invocation::Shell(line) => {
                let mut cmd = Command::new("sh");
                cmd.arg("-c").arg(line);
                cmd
            }
        };
        if let Some(dir) = spec.working_dir() {
            cmd.current_dir(dir);
        }
        for (key, value) in spec.env_vars() {
            cmd.env(key, value);
        }
        // sudo and ssh may need to prompt
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn should_echo(&self, spec: &CommandSpec) -> bool {
        self.echo && spec.prints_output() && self.verbosity.allows(spec.verbosity_threshold())
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(Verbosity::Normal)
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> BallastResult<CommandOutput> {
        let line = spec.display();
        debug!(command = %line, dir = ?spec.working_dir(), "executing");

        let output = Self::build(spec)
            .output()
            .map_err(|source| BallastError::ExecutionSetup {
                command: line.clone(),
                source,
            })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command = %line, exit_code = ?result.exit_code, "finished");

        if self.should_echo(spec) {
            let _ = std::io::stdout().write_all(spec.redact_text(&result.stdout).as_bytes());
            let _ = std::io::stderr().write_all(spec.redact_text(&result.stderr).as_bytes());
        }
        Ok(result)
    }
}
