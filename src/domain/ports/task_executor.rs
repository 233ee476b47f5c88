//! TaskExecutor port - performs a single task operation

use crate::domain::entities::Operation;
use crate::domain::value_objects::ExecutionResult;
use crate::error::BallastResult;

/// Executes one `Operation`.
///
/// Ordinary failures (non-zero exit, missing file) come back as an
/// unsuccessful `ExecutionResult`; `Err` means the executor itself could not
/// do its job.
pub trait TaskExecutor {
    fn execute(&self, operation: &Operation) -> BallastResult<ExecutionResult>;
}
