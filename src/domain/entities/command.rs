//! External command descriptions
//!
//! A `CommandSpec` is an inert description of a process to run. Running it is
//! the job of a `CommandRunner` adapter.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ExecutionResult, Verbosity};

/// Replacement text for redacted secrets.
pub const REDACTED: &str = "****";

/// How the process is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Spawn `program` directly with `args`
    Program { program: String, args: Vec<String> },
    /// Hand a full command line to `sh -c` (pipes, redirects, `|| true`)
    Shell(String),
}

/// A single external command plus the options that govern how it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    invocation: Invocation,
    dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    print_output: bool,
    threshold: Verbosity,
    redactions: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self::from_invocation(Invocation::Program {
            program: program.into(),
            args: Vec::new(),
        })
    }

    pub fn shell(line: impl Into<String>) -> Self {
        Self::from_invocation(Invocation::Shell(line.into()))
    }

    fn from_invocation(invocation: Invocation) -> Self {
        Self {
            invocation,
            dir: None,
            env: Vec::new(),
            print_output: true,
            threshold: Verbosity::Normal,
            redactions: Vec::new(),
        }
    }

    /// Append one argument. Ignored for shell invocations.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        if let Invocation::Program { args, .. } = &mut self.invocation {
            args.push(arg.into());
        }
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self = self.arg(arg);
        }
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Capture output without echoing it.
    pub fn quiet(mut self) -> Self {
        self.print_output = false;
        self
    }

    /// Only echo output at `-vv`.
    pub fn debug_only(self) -> Self {
        self.threshold(Verbosity::Debug)
    }

    pub fn threshold(mut self, threshold: Verbosity) -> Self {
        self.threshold = threshold;
        self
    }

    /// Never show `secret` in logs or echoed output.
    pub fn redact(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.redactions.push(secret);
        }
        self
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn prints_output(&self) -> bool {
        self.print_output
    }

    pub fn verbosity_threshold(&self) -> Verbosity {
        self.threshold
    }

    /// Human readable command line, secrets masked.
    pub fn display(&self) -> String {
        let line = match &self.invocation {
            Invocation::Program { program, args } => {
                let mut parts = vec![program.clone()];
                parts.extend(args.iter().map(|a| shell_quote(a)));
                parts.join(" ")
            }
            Invocation::Shell(line) => line.clone(),
        };
        self.redact_text(&line)
    }

    pub fn redact_text(&self, text: &str) -> String {
        self.redactions
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret, REDACTED))
    }
}

/// Quote `value` for a POSIX shell when it needs quoting.
pub fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// Raw output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn into_result(self) -> ExecutionResult {
        if self.success() {
            ExecutionResult::ok(self.stdout)
        } else {
            let message = if self.stderr.trim().is_empty() {
                self.stdout
            } else {
                self.stderr
            };
            ExecutionResult::failure(message).with_exit_code(self.exit_code)
        }
    }
}
