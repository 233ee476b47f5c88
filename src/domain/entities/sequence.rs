//! Ordered task execution with a compensation stack
//!
//! Tasks run strictly in insertion order. Each successful task that carries a
//! rollback pushes it onto a stack; the first failing task pops and runs the
//! stack (most recent first) and stops the sequence.

use tracing::{debug, warn};

use super::task::{Operation, Task};
use crate::domain::ports::TaskExecutor;
use crate::domain::value_objects::ExecutionResult;
use crate::error::BallastResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSequence {
    tasks: Vec<Task>,
}

impl TaskSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) -> &mut Self {
        self.tasks.push(task);
        self
    }

    pub fn add_with_rollback(&mut self, task: Task, rollback: impl Into<Operation>) -> &mut Self {
        self.add(task.with_rollback(rollback))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Run every task, rolling back on the first failure.
    ///
    /// Returns the failing task's result, or the last task's result when all
    /// succeed. An empty sequence succeeds with an empty message.
    ///
    /// An executor setup error aborts immediately after compensating the
    /// tasks that already completed.
    pub fn run(&self, executor: &dyn TaskExecutor) -> BallastResult<ExecutionResult> {
        let mut compensations: Vec<&Operation> = Vec::new();
        let mut last = ExecutionResult::ok("");
        let total = self.tasks.len();

        for (index, task) in self.tasks.iter().enumerate() {
            debug!(task = task.label(), "task {}/{}", index + 1, total);
            let result = match executor.execute(task.action()) {
                Ok(result) => result,
                Err(err) => {
                    warn!(task = task.label(), error = %err, "task could not be started");
                    Self::compensate(executor, compensations);
                    return Err(err);
                }
            };

            if result.is_success() {
                if let Some(rollback) = task.rollback() {
                    compensations.push(rollback);
                }
                last = result;
                continue;
            }

            if task.allows_failure() {
                debug!(task = task.label(), "ignoring failure of best-effort task");
                continue;
            }

            warn!(
                task = task.label(),
                message = result.message().trim(),
                "task failed, rolling back {} completed step(s)",
                compensations.len()
            );
            Self::compensate(executor, compensations);
            return Ok(result);
        }

        Ok(last)
    }

    fn compensate(executor: &dyn TaskExecutor, mut stack: Vec<&Operation>) {
        while let Some(rollback) = stack.pop() {
            match executor.execute(rollback) {
                Ok(result) if result.is_success() => {
                    debug!(rollback = %rollback.describe(), "rolled back");
                }
                Ok(result) => {
                    warn!(
                        rollback = %rollback.describe(),
                        message = result.message().trim(),
                        "rollback failed"
                    );
                }
                Err(err) => {
                    warn!(rollback = %rollback.describe(), error = %err, "rollback could not be started");
                }
            }
        }
    }
}
