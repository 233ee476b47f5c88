//! Infrastructure Layer
//!
//! Concrete adapters for the domain ports: processes, the local filesystem,
//! the task executor, event sinks and network probing.

pub mod clock;
pub mod events;
pub mod executor;
pub mod fs;
pub mod net;
pub mod process;

pub use clock::ThreadPause;
pub use events::JsonEventSink;
pub use executor::HostExecutor;
pub use fs::LocalFs;
pub use process::ProcessRunner;
