//! Scripted command runner for unit tests

use std::cell::RefCell;

use crate::domain::entities::{CommandOutput, CommandSpec};
use crate::domain::ports::CommandRunner;
use crate::error::{BallastError, BallastResult};

type Matcher = Box<dyn Fn(&str) -> bool>;

enum Reply {
    Output(CommandOutput),
    SetupError,
}

/// Records every command line and answers from a script.
///
/// Unscripted commands succeed with empty output. The first matching rule
/// wins.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(Matcher, Reply)>,
    log: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose line starts with `prefix` exit 1.
    pub fn fail(self, prefix: &str) -> Self {
        self.reply(
            prefix,
            CommandOutput {
                exit_code: Some(1),
                stdout: String::new(),
                stderr: format!("scripted failure: {prefix}"),
            },
        )
    }

    /// Commands whose line starts with `prefix` succeed printing `stdout`.
    pub fn respond(self, prefix: &str, stdout: &str) -> Self {
        self.reply(
            prefix,
            CommandOutput {
                exit_code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Commands whose line starts with `prefix` cannot be spawned.
    pub fn broken(mut self, prefix: &str) -> Self {
        let prefix = prefix.to_string();
        self.rules
            .push((Box::new(move |line| line.starts_with(&prefix)), Reply::SetupError));
        self
    }

    fn reply(mut self, prefix: &str, output: CommandOutput) -> Self {
        let prefix = prefix.to_string();
        self.rules
            .push((Box::new(move |line| line.starts_with(&prefix)), Reply::Output(output)));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Recorded commands starting with `prefix`.
    pub fn commands_starting_with(&self, prefix: &str) -> Vec<String> {
        self.commands()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> BallastResult<CommandOutput> {
        let line = spec.display();
        self.log.borrow_mut().push(line.clone());
        match self.rules.iter().find(|(matches, _)| matches(&line)) {
            Some((_, Reply::Output(output))) => Ok(output.clone()),
            Some((_, Reply::SetupError)) => Err(BallastError::ExecutionSetup {
                command: line,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted"),
            }),
            None => Ok(CommandOutput {
                exit_code: Some(0),
                ..Default::default()
            }),
        }
    }
}
