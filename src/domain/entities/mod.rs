//! Domain Entities

mod command;
mod deploy;
mod sequence;
mod task;

pub use command::{shell_quote, CommandOutput, CommandSpec, Invocation, REDACTED};
pub use deploy::{DeployCredentials, DeployMode, DeployRequest, ResolvedDeployPlan};
pub use sequence::TaskSequence;
pub use task::{Operation, Task};
