//! Value Objects
//!
//! Immutable types with no identity.

mod deploy_stage;
mod execution;
mod platform;
mod verbosity;

pub use deploy_stage::DeployStage;
pub use execution::ExecutionResult;
pub use platform::{Platform, UnsupportedPlatform};
pub use verbosity::Verbosity;
