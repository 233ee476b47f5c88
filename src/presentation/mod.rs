//! Presentation Layer
//!
//! Command-line parsing and the wiring between the CLI and the application
//! layer. Terminal rendering lives in the binary.

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands, DeployArgs, DockerCommands, SetupCommands};
pub use factory::{create_deploy_pipeline, create_host_strategy, create_json_event_sink, Services};
