//! Application Layer
//!
//! Use cases that orchestrate the workflow commands.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT spawn processes or touch files itself (ports do)
//! - Reports to the user only through the `Console` port
//!
//! ## Use Cases
//!
//! - `setup` - prerequisites, project hooks, container host engine
//! - `compose` - proxy, compose up with readiness wait, SQL connection info
//! - `boot` - container host boot and local DNS
//! - `rebuild` - refresh the local database from a remote environment
//! - `key_prep` - fold a private key into the env file
//! - `deploy` - build, sanitize, merge and push a release artifact
//!
//! ## Services
//!
//! - `host` - per-platform strategies behind `HostStrategy`
//! - `frontend` - sentinel files written by the front-end build container

pub mod boot;
pub mod compose;
mod context;
pub mod deploy;
pub mod frontend;
pub mod host;
pub mod key_prep;
pub mod rebuild;
pub mod setup;

#[cfg(test)]
pub(crate) mod testing;

pub use context::Context;
pub use deploy::{DeployLayout, DeployPipeline};
pub use frontend::{BuildStage, FrontEndSentinels};
pub use host::{strategy_for, HostStrategy, Requirement};
