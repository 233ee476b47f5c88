//! Fold a private key file into a single `SSH_PRIVATE_KEY=` env line
//!
//! CI services store secrets as one-line values; the deploy pipeline expands
//! the literal `\n` separators again when it writes the key.

use super::Context;
use crate::domain::entities::{Operation, Task, TaskSequence};
use crate::error::{BallastError, BallastResult};

pub const ENV_FILE: &str = "env";

/// `contents` with every CR and LF replaced by a literal `\n`.
pub fn one_line(contents: &str) -> String {
    contents.replace(['\r', '\n'], "\\n")
}

/// Append the key at `key_path` (relative to the project root) to `env`.
pub fn key_prep(ctx: &Context<'_>, key_path: &str) -> BallastResult<()> {
    let source = ctx.project_path(key_path);
    let contents = ctx.fs.read(&source).map_err(|err| {
        BallastError::Precondition(format!("Unable to read the key file: {err}"))
    })?;

    let mut sequence = TaskSequence::new();
    sequence.add(Task::new(
        "append SSH_PRIVATE_KEY to env",
        Operation::append(
            ctx.project_path(ENV_FILE),
            format!("SSH_PRIVATE_KEY={}\n", one_line(&contents)),
        ),
    ));
    let result = ctx.run(&sequence)?;
    if result.is_success() {
        ctx.console
            .success("The key has been processed and appended to the env file.");
        Ok(())
    } else {
        Err(BallastError::aborted("Error message:", result.message()))
    }
}
