//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides concrete implementations; tests provide doubles.

pub mod command_runner;
pub mod console;
pub mod deploy_events;
pub mod file_system;
pub mod readiness;
pub mod task_executor;

pub use command_runner::{is_installed, CommandRunner};
pub use console::Console;
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use readiness::{NoProgress, Pause, PollProgress};
pub use task_executor::TaskExecutor;
